use diesel::{insert_into, prelude::*};

use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub fn list_restaurants(conn: &mut SqliteConnection) -> QueryResult<Vec<Restaurant>> {
    restaurants::table
        .order_by(restaurants::id)
        .select(Restaurant::as_select())
        .load(conn)
}

pub fn find_restaurant(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Restaurant>> {
    restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()
}

pub fn insert_restaurant(
    conn: &mut SqliteConnection,
    restaurant: &NewRestaurant,
) -> QueryResult<Restaurant> {
    insert_into(restaurants::table)
        .values(restaurant)
        .returning(Restaurant::as_returning())
        .get_result(conn)
}

/// Deletes a restaurant together with every association it owns.
///
/// Returns `false` when no restaurant has the given id.
pub fn delete_restaurant(conn: &mut SqliteConnection, id: i32) -> QueryResult<bool> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(id)))
            .execute(conn)?;
        let deleted = diesel::delete(restaurants::table.find(id)).execute(conn)?;
        Ok(deleted > 0)
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> QueryResult<Vec<Pizza>> {
    pizzas::table
        .order_by(pizzas::id)
        .select(Pizza::as_select())
        .load(conn)
}

pub fn find_pizza(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Pizza>> {
    pizzas::table
        .find(id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()
}

pub fn insert_pizza(conn: &mut SqliteConnection, pizza: &NewPizza) -> QueryResult<Pizza> {
    insert_into(pizzas::table)
        .values(pizza)
        .returning(Pizza::as_returning())
        .get_result(conn)
}

/// Associations of a restaurant joined with their pizza, by ascending id.
pub fn restaurant_pizzas_for(
    conn: &mut SqliteConnection,
    restaurant: &Restaurant,
) -> QueryResult<Vec<(RestaurantPizza, Pizza)>> {
    RestaurantPizza::belonging_to(restaurant)
        .inner_join(pizzas::table)
        .order_by(restaurant_pizzas::id)
        .select((RestaurantPizza::as_select(), Pizza::as_select()))
        .load(conn)
}

pub fn insert_restaurant_pizza(
    conn: &mut SqliteConnection,
    restaurant_pizza: &NewRestaurantPizza,
) -> QueryResult<RestaurantPizza> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        insert_into(restaurant_pizzas::table)
            .values(restaurant_pizza)
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)
    })
}

pub fn count_restaurant_pizzas(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> QueryResult<i64> {
    restaurant_pizzas::table
        .filter(restaurant_pizzas::restaurant_id.eq(restaurant_id))
        .count()
        .get_result(conn)
}

/// Empties all tables, children first.
pub fn clear_all(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{in_memory_pool, run_migrations};
    use diesel::r2d2::{ConnectionManager, PooledConnection};

    fn setup_database() -> PooledConnection<ConnectionManager<SqliteConnection>> {
        let pool = in_memory_pool().unwrap();
        run_migrations(&pool).unwrap();
        pool.get().unwrap()
    }

    fn seed_restaurant(conn: &mut SqliteConnection, name: &str) -> Restaurant {
        insert_restaurant(
            conn,
            &NewRestaurant {
                name,
                address: "Test Address",
            },
        )
        .unwrap()
    }

    fn seed_pizza(conn: &mut SqliteConnection, name: &str) -> Pizza {
        insert_pizza(
            conn,
            &NewPizza {
                name,
                ingredients: "Dough, Tomato Sauce, Cheese",
            },
        )
        .unwrap()
    }

    #[test]
    fn test_insert_assigns_ids() {
        let conn = &mut setup_database();

        let first = seed_restaurant(conn, "Test Restaurant 1");
        let second = seed_restaurant(conn, "Test Restaurant 2");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.address, "Test Address");

        let pizza = seed_pizza(conn, "Emma");
        assert_eq!(pizza.id, 1);
    }

    #[test]
    fn test_find_missing_returns_none() {
        let conn = &mut setup_database();

        assert_eq!(find_restaurant(conn, 42).unwrap(), None);
        assert_eq!(find_pizza(conn, 42).unwrap(), None);
    }

    #[test]
    fn test_list_restaurants_in_id_order() {
        let conn = &mut setup_database();
        seed_restaurant(conn, "Test Restaurant 1");
        seed_restaurant(conn, "Test Restaurant 2");

        let names = list_restaurants(conn)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Test Restaurant 1", "Test Restaurant 2"]);
    }

    #[test]
    fn test_restaurant_pizzas_for_only_returns_own() {
        let conn = &mut setup_database();
        let restaurant1 = seed_restaurant(conn, "Test Restaurant 1");
        let restaurant2 = seed_restaurant(conn, "Test Restaurant 2");
        let emma = seed_pizza(conn, "Emma");
        let geri = seed_pizza(conn, "Geri");

        for (price, pizza, restaurant) in [
            (5, &geri, &restaurant1),
            (10, &emma, &restaurant1),
            (15, &emma, &restaurant2),
        ] {
            let rp = NewRestaurantPizza::new(price, pizza.id, restaurant.id).unwrap();
            insert_restaurant_pizza(conn, &rp).unwrap();
        }

        let rps = restaurant_pizzas_for(conn, &restaurant1).unwrap();
        assert_eq!(rps.len(), 2);
        assert_eq!(rps[0].0.price, 5);
        assert_eq!(rps[0].1, geri);
        assert_eq!(rps[1].0.price, 10);
        assert_eq!(rps[1].1, emma);
        assert!(rps.iter().all(|(rp, _)| rp.restaurant_id == restaurant1.id));
    }

    #[test]
    fn test_delete_restaurant_cascades() {
        let conn = &mut setup_database();
        let restaurant1 = seed_restaurant(conn, "Test Restaurant 1");
        let restaurant2 = seed_restaurant(conn, "Test Restaurant 2");
        let pizza = seed_pizza(conn, "Emma");
        for restaurant in [&restaurant1, &restaurant1, &restaurant2] {
            let rp = NewRestaurantPizza::new(12, pizza.id, restaurant.id).unwrap();
            insert_restaurant_pizza(conn, &rp).unwrap();
        }

        assert!(delete_restaurant(conn, restaurant1.id).unwrap());

        assert_eq!(find_restaurant(conn, restaurant1.id).unwrap(), None);
        assert_eq!(count_restaurant_pizzas(conn, restaurant1.id).unwrap(), 0);
        assert_eq!(count_restaurant_pizzas(conn, restaurant2.id).unwrap(), 1);
        assert_eq!(find_pizza(conn, pizza.id).unwrap(), Some(pizza));
    }

    #[test]
    fn test_delete_missing_restaurant() {
        let conn = &mut setup_database();

        assert!(!delete_restaurant(conn, 7).unwrap());
    }

    #[test]
    fn test_dangling_foreign_key_is_rejected_by_store() {
        let conn = &mut setup_database();
        let restaurant = seed_restaurant(conn, "Test Restaurant 1");

        let rp = NewRestaurantPizza::new(10, 99, restaurant.id).unwrap();
        let err = insert_restaurant_pizza(conn, &rp).unwrap_err();
        assert!(matches!(
            err,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                _
            )
        ));
        assert_eq!(count_restaurant_pizzas(conn, restaurant.id).unwrap(), 0);
    }

    #[test]
    fn test_clear_all() {
        let conn = &mut setup_database();
        let restaurant = seed_restaurant(conn, "Test Restaurant 1");
        let pizza = seed_pizza(conn, "Emma");
        let rp = NewRestaurantPizza::new(1, pizza.id, restaurant.id).unwrap();
        insert_restaurant_pizza(conn, &rp).unwrap();

        clear_all(conn).unwrap();

        assert!(list_restaurants(conn).unwrap().is_empty());
        assert!(list_pizzas(conn).unwrap().is_empty());
        assert_eq!(count_restaurant_pizzas(conn, restaurant.id).unwrap(), 0);
    }
}
