// handlers/mod.rs - one module per resource
//
// Read routes and /login/ are always public. Write routes (POST/PUT/DELETE)
// sit behind the bearer-token gate when `security.require_auth` is on; the
// gate is attached in `router.rs`, not here.

pub mod games;
pub mod genres;
pub mod login;
pub mod platforms;
pub mod public;
pub mod utils;
