mod session;

pub use session::{get_user_from_headers, get_user_from_session, prepare_logout_response};

pub(crate) use session::new_session_header;
