pub mod auth_handler;

pub use auth_handler::{
    __path_change_password, __path_get_profile, __path_login, __path_register,
    __path_update_profile, change_password, get_profile, login, register, update_profile,
};
