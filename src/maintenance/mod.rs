// hcs-logs - Maintenance Module
//
// Interactive create/edit/delete/print loop over the scope store, entered
// through `hcs-logs config`.

mod collect;
mod machine;
mod table;

pub use collect::{collect_credential, collect_remote_credential};
pub use machine::{Maintenance, MenuState};
pub use table::render_scopes;
