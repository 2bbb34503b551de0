// hcs-logs - Prompt Module
//
// Retry-until-valid terminal input used by the maintenance menu.

mod error;
mod question;
mod scanner;

pub use error::{PromptError, ValidationError};
pub use question::{Prompt, PromptOption, Validator};
pub use scanner::Scanner;
