pub use super::users::Entity as Users;
pub use super::weather_records::Entity as WeatherRecords;
