//! Sample input for `valforge generate --file demos/users.rs`.
//!
//! valforge reads the `#[validate]` attributes; the crate that compiles this
//! struct must accept them, typically through a derive that declares
//! `validate` as a helper attribute.
#![allow(non_snake_case)]

pub struct User {
    #[validate("required")]
    pub Name: String,
    #[validate("gte=18")]
    pub Age: i32,
    #[validate("minlen=6")]
    pub Pwd1: String,
    #[validate("eqfieldsecure=Pwd1")]
    pub Pwd2: String,
    #[validate("email")]
    pub Email: String,
    #[validate("required")]
    pub Color: String,
    pub Nickname: Option<String>,
}
