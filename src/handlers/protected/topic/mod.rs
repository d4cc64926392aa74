// handlers/protected/topic - /topicos CRUD
//
// Every handler takes an AuthenticatedPrincipal, so a request the gate could
// not authenticate is answered with 401 before any store access.

pub mod create;
pub mod list;
pub mod record;

pub use create::create;
pub use list::list;
pub use record::{delete, detail, update};
