/// Sources module
///
/// Token acquisition (`oauth2`) and authenticated resource fetching (`fetch`).
pub mod fetch;
pub mod oauth2;
