pub mod auth_service;
pub use auth_service::{AuthError, AuthService, AuthenticatedUser, LoginResult};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod weather_service;
pub use weather_service::{WeatherError, WeatherService};

pub mod weather_service_impl;
pub use weather_service_impl::SeaOrmWeatherService;
