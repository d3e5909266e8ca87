use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::user::{NewUser, User};

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn find_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(username.eq(target_username))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn exists_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(
            users.filter(username.eq(target_username)),
        ))
        .get_result(conn)
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(target_email))))
            .get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn count(conn: &mut PgConnection) -> Result<i64, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.count().get_result(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .select(User::as_select())
            .order(created_at.asc())
            .load::<User>(conn)
    }
}
