use diesel::prelude::*;
use jiff_diesel::DateTime;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Rating {
    pub id: i32,
    pub order_id: i32,
    pub rater_id: i32,
    pub ratee_id: i32,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::ratings)]
pub struct NewRating {
    pub order_id: i32,
    pub rater_id: i32,
    pub ratee_id: i32,
    pub score: i16,
    pub comment: Option<String>,
}
