pub mod countries;
pub mod models;
pub mod users;

pub use countries::CountriesApi;
pub use models::{
    CountriesData, Country, CountryData, CountryDetail, GraphqlError, GraphqlResponse, Named,
    NewPost, Post, User,
};
pub use users::UsersApi;
