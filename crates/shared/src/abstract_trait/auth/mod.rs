mod service;

pub use self::service::{
    DynLoginService, DynRegisterService, LoginServiceTrait, RegisterServiceTrait,
};
