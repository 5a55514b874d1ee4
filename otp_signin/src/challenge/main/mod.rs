mod create;
mod define;
mod verify;

pub(crate) use create::create_auth_challenge;
pub(crate) use define::define_auth_challenge;
pub(crate) use verify::verify_auth_challenge;
