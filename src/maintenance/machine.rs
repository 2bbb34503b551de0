// hcs-logs - Config maintenance state machine
//
// MenuSelect dispatches to Create/Edit/Delete/Print, each of which returns to
// MenuSelect; Quit ends the loop. The store is only mutated in memory here;
// the caller persists it after `run` returns.

use std::io::{BufRead, Write};

use crate::prompt::{Prompt, PromptError, Scanner, ValidationError};
use crate::store::{is_account_hash, Credential, ScopeName, ScopeStore};

use super::collect::{collect_credential, collect_remote_credential};
use super::table::render_scopes;

/// States of the maintenance loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MenuSelect,
    Create,
    Edit,
    Delete,
    Print,
    Quit,
}

/// Interactive editor over a loaded scope store.
pub struct Maintenance<'a, R, W> {
    store: &'a mut ScopeStore,
    scanner: &'a mut Scanner<R, W>,
}

impl<'a, R: BufRead, W: Write> Maintenance<'a, R, W> {
    pub fn new(store: &'a mut ScopeStore, scanner: &'a mut Scanner<R, W>) -> Self {
        Self { store, scanner }
    }

    /// Drive the menu until the operator quits.
    pub fn run(&mut self) -> Result<(), PromptError> {
        let mut state = MenuState::MenuSelect;
        while state != MenuState::Quit {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Execute one state and return the next.
    pub fn step(&mut self, state: MenuState) -> Result<MenuState, PromptError> {
        match state {
            MenuState::MenuSelect => self.select(),
            MenuState::Create => self.create().map(|_| MenuState::MenuSelect),
            MenuState::Edit => self.edit().map(|_| MenuState::MenuSelect),
            MenuState::Delete => self.delete().map(|_| MenuState::MenuSelect),
            MenuState::Print => self.print().map(|_| MenuState::MenuSelect),
            MenuState::Quit => Ok(MenuState::Quit),
        }
    }

    fn select(&mut self) -> Result<MenuState, PromptError> {
        let choice = self.scanner.scan(
            &Prompt::new("Select option: ")
                .default_value("create")
                .min_length(1)
                .option("create", "create new configure")
                .option("print", "print exists configure")
                .option("edit", "edit exists configure")
                .option("delete", "delete exists configure")
                .option("quit", "save & exit configure"),
        )?;

        Ok(match choice.as_str() {
            "create" => MenuState::Create,
            "print" => MenuState::Print,
            "edit" => MenuState::Edit,
            "delete" => MenuState::Delete,
            _ => MenuState::Quit,
        })
    }

    fn create(&mut self) -> Result<(), PromptError> {
        let kind = self.scanner.scan(
            &Prompt::new("Select configure scope:")
                .default_value("default")
                .min_length(1)
                .option("default", "default/global config")
                .option("custom", "set config for a different account")
                .option("remote", "set config for a remote storage destination"),
        )?;

        let name = match kind.as_str() {
            "custom" => ScopeName::custom(self.scanner.scan(
                &Prompt::new(
                    "Input accountHash (in order to use configure more effectively, please use accountHash as scope name): ",
                )
                .validator(|s| {
                    if is_account_hash(s) {
                        Ok(())
                    } else {
                        Err(ValidationError::new("seems not a valid accountHash"))
                    }
                }),
            )?),
            "remote" => ScopeName::remote(self.scanner.scan(
                &Prompt::new("Input remote name, use it as {name}:{prefix} in the download directory: ")
                    .min_length(1)
                    .validator(|s| {
                        if s.contains(':') || s.chars().any(char::is_whitespace) {
                            Err(ValidationError::new("remote name cannot contain ':' or spaces"))
                        } else {
                            Ok(())
                        }
                    }),
            )?),
            _ => ScopeName::Default,
        };

        let mut credential = self.store.get(&name).cloned().unwrap_or_default();
        if name.is_remote() {
            collect_remote_credential(self.scanner, &mut credential)?;
        } else {
            if let (ScopeName::Custom(_), Some(default)) = (&name, self.store.default_scope()) {
                credential.seed_login_from(default);
            }
            collect_credential(self.scanner, &mut credential)?;
        }

        tracing::info!(scope = %name, kind = name.kind(), "Scope created");
        self.store.insert(name, credential);
        Ok(())
    }

    fn edit(&mut self) -> Result<(), PromptError> {
        let Some(name) = self.pick("Which config do you want to edit? ")? else {
            return Ok(());
        };

        let mut credential: Credential = match self.store.get(&name) {
            Some(credential) => credential.clone(),
            None => return self.report_not_found(&name),
        };
        if name.is_remote() {
            collect_remote_credential(self.scanner, &mut credential)?;
        } else {
            collect_credential(self.scanner, &mut credential)?;
        }

        tracing::info!(scope = %name, "Scope updated");
        self.store.insert(name, credential);
        Ok(())
    }

    fn delete(&mut self) -> Result<(), PromptError> {
        let Some(name) = self.pick("Which config do you want to delete? ")? else {
            return Ok(());
        };

        match self.store.remove(&name) {
            Ok(_) => {
                tracing::info!(scope = %name, "Scope deleted");
                writeln!(self.scanner.output(), "Scope {} deleted", name)?;
                Ok(())
            }
            Err(_) => self.report_not_found(&name),
        }
    }

    fn print(&mut self) -> Result<(), PromptError> {
        render_scopes(self.store, self.scanner.output())?;
        Ok(())
    }

    /// List the store and ask for a scope name. `None` when there is nothing
    /// to pick from.
    fn pick(&mut self, question: &str) -> Result<Option<ScopeName>, PromptError> {
        if self.store.is_empty() {
            writeln!(self.scanner.output(), "Nothing found, try create new configure")?;
            return Ok(None);
        }
        render_scopes(self.store, self.scanner.output())?;
        let answer = self.scanner.scan(&Prompt::new(question).min_length(1))?;
        Ok(Some(ScopeName::parse(&answer)))
    }

    fn report_not_found(&mut self, name: &ScopeName) -> Result<(), PromptError> {
        tracing::debug!(scope = %name, "Maintenance referenced an unknown scope");
        writeln!(self.scanner.output(), "Scope not found: {}", name)?;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
