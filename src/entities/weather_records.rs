use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weather_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub city_name: String,

    pub date: Date,

    /// Degrees Celsius
    pub temperature: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
