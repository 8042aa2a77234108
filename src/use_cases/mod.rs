pub mod authenticate;
pub mod decide_request;
pub mod list_requests;
pub mod login;
pub mod logout;
pub mod lookup_manager;
pub mod submit_request;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod test_support;
