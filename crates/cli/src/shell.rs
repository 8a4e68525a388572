//! Interactive numbered menu.

use std::io::{BufRead, Write};

use ppetrack_auth::{CredentialTable, LoginAttempt, LoginGate};
use ppetrack_core::{HospitalCode, ItemCode, SupplierCode, find_by_id};
use ppetrack_infra::{InitRequest, RecordStore, Resource, ServiceError, Tracker};
use ppetrack_inventory::Direction;
use ppetrack_parties::Hospital;

use crate::render;

/// Hospitals asked for at initialization when none are configured.
const HOSPITAL_PROMPTS: usize = 3;

const MENU: &str = "\nMenu:\n\
1. Initialize Inventory\n\
2. Update Inventory\n\
3. Record Distribution\n\
4. Track Inventory\n\
5. Search Distribution\n\
6. Generate Supplier Report\n\
7. Generate Hospital Report\n\
8. Generate Monthly Report\n\
9. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Reads operator input line by line and writes results back.
///
/// End of input behaves like choosing "Exit".
pub struct Shell<'t, S, R, W> {
    tracker: &'t Tracker<S>,
    input: R,
    out: W,
}

/// Ends the current action when input runs out.
macro_rules! ask {
    ($shell:expr, $label:expr) => {
        match $shell.prompt($label)? {
            Some(line) => line,
            None => return Ok(Flow::Exit),
        }
    };
}

impl<'t, S: RecordStore, R: BufRead, W: Write> Shell<'t, S, R, W> {
    pub fn new(tracker: &'t Tracker<S>, input: R, out: W) -> Self {
        Self {
            tracker,
            input,
            out,
        }
    }

    /// Prompt for credentials until granted or locked out.
    pub fn login(&mut self, credentials: &CredentialTable) -> anyhow::Result<bool> {
        let mut gate = LoginGate::new(credentials);
        loop {
            let Some(username) = self.prompt("Enter username: ")? else {
                return Ok(false);
            };
            let Some(password) = self.prompt("Enter password: ")? else {
                return Ok(false);
            };

            match gate.attempt(&username, &password) {
                LoginAttempt::Granted => {
                    writeln!(self.out, "Login successful!")?;
                    return Ok(true);
                }
                LoginAttempt::Denied { remaining } => {
                    writeln!(self.out, "Login failed! {remaining} attempts remaining.")?;
                }
                LoginAttempt::LockedOut => {
                    writeln!(self.out, "Too many failed attempts. Access terminated.")?;
                    return Ok(false);
                }
            }
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.initialize()?,
                "2" => self.update_inventory()?,
                "3" => self.record_distribution()?,
                "4" => self.show(|t, out| {
                    t.reports()
                        .inventory_listing()
                        .map(|lines| render::inventory(out, &lines))
                })?,
                "5" => self.search()?,
                "6" => self.show(|t, out| {
                    t.reports()
                        .supplier_report()
                        .map(|report| render::supplier_report(out, &report))
                })?,
                "7" => self.show(|t, out| {
                    t.reports()
                        .hospital_report()
                        .map(|report| render::hospital_report(out, &report))
                })?,
                "8" => self.monthly_report()?,
                "9" => {
                    writeln!(self.out, "Exiting program")?;
                    Flow::Exit
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Print `label`, then read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &ServiceError) -> anyhow::Result<Flow> {
        if err.is_io() {
            tracing::error!(error = %err, "record store failure");
        }
        writeln!(self.out, "{}", render::failure_message(err))?;
        Ok(Flow::Continue)
    }

    fn show<F>(&mut self, f: F) -> anyhow::Result<Flow>
    where
        F: FnOnce(&Tracker<S>, &mut W) -> Result<std::io::Result<()>, ServiceError>,
    {
        match f(self.tracker, &mut self.out) {
            Ok(written) => {
                written?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(&e),
        }
    }

    fn initialize(&mut self) -> anyhow::Result<Flow> {
        let tracker = self.tracker;
        if tracker.store().exists(Resource::Inventory)? {
            writeln!(self.out, "Inventory already created.")?;
            return Ok(Flow::Continue);
        }

        let config = tracker.config();
        let mut request = InitRequest::default();

        for entry in &config.catalog {
            let raw = ask!(
                self,
                &format!(
                    "Enter supplier code for {} (e.g., {}): ",
                    entry.item_name, entry.supplier_code
                )
            );
            if raw.is_empty() {
                continue;
            }
            match SupplierCode::new(&raw) {
                Ok(code) if find_by_id(&config.suppliers, &code).is_some() => {
                    request.suppliers.push((entry.item_code.clone(), code));
                }
                _ => writeln!(
                    self.out,
                    "Invalid supplier code. Defaulting to {} for {}.",
                    entry.supplier_code, entry.item_name
                )?,
            }
        }

        if config.hospitals.is_empty() {
            let mut n = 1;
            while n <= HOSPITAL_PROMPTS {
                let code = ask!(self, &format!("Enter hospital code for hospital {n}: "));
                let name = ask!(self, &format!("Enter hospital name for hospital {n}: "));
                match HospitalCode::new(&code).and_then(|code| Hospital::new(code, name)) {
                    Ok(hospital) => {
                        request.hospitals.push(hospital);
                        n += 1;
                    }
                    Err(e) => writeln!(self.out, "{}", render::domain_message(&e))?,
                }
            }
        }

        match tracker.initialize(&request) {
            Ok(outcome) => render::init_outcome(&mut self.out, &outcome)?,
            Err(e) => return self.report(&e),
        }
        Ok(Flow::Continue)
    }

    /// Read an item code, echoing validation failures.
    fn item_code(&mut self, label: &str) -> anyhow::Result<Option<Option<ItemCode>>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match ItemCode::new(&raw) {
            Ok(code) => Ok(Some(Some(code))),
            Err(e) => {
                writeln!(self.out, "{}", render::domain_message(&e))?;
                Ok(Some(None))
            }
        }
    }

    fn quantity(&mut self) -> anyhow::Result<Option<Option<i64>>> {
        let Some(raw) = self.prompt("Enter quantity: ")? else {
            return Ok(None);
        };
        match raw.parse::<i64>() {
            Ok(q) => Ok(Some(Some(q))),
            Err(_) => {
                writeln!(self.out, "Quantity must be a whole number.")?;
                Ok(Some(None))
            }
        }
    }

    fn update_inventory(&mut self) -> anyhow::Result<Flow> {
        let Some(item) = self.item_code("Enter item code: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.quantity()? else {
            return Ok(Flow::Exit);
        };
        let action = ask!(self, "Enter action (add/remove): ");

        let (Some(item), Some(quantity)) = (item, quantity) else {
            return Ok(Flow::Continue);
        };
        let Ok(direction) = action.parse::<Direction>() else {
            writeln!(self.out, "Invalid action. Use 'add' or 'remove'.")?;
            return Ok(Flow::Continue);
        };

        match self.tracker.inventory().adjust_quantity(&item, quantity, direction) {
            Ok(updated) => render::adjusted(&mut self.out, &updated)?,
            Err(e) => return self.report(&e),
        }
        Ok(Flow::Continue)
    }

    fn record_distribution(&mut self) -> anyhow::Result<Flow> {
        let Some(item) = self.item_code("Enter item code: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.quantity()? else {
            return Ok(Flow::Exit);
        };
        let hospital = ask!(self, "Enter hospital code: ");

        let (Some(item), Some(quantity)) = (item, quantity) else {
            return Ok(Flow::Continue);
        };
        let hospital = match HospitalCode::new(&hospital) {
            Ok(code) => code,
            Err(e) => {
                writeln!(self.out, "{}", render::domain_message(&e))?;
                return Ok(Flow::Continue);
            }
        };

        match self.tracker.dispatch(&item, quantity, &hospital) {
            Ok(dispatched) => render::dispatched(&mut self.out, &dispatched)?,
            Err(e) => return self.report(&e),
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> anyhow::Result<Flow> {
        let Some(item) = self.item_code("Enter item code to search: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(item) = item else {
            return Ok(Flow::Continue);
        };
        self.show(|t, out| {
            t.distribution()
                .search_by_item(&item)
                .map(|totals| render::distribution_totals(out, &item, &totals))
        })
    }

    fn monthly_report(&mut self) -> anyhow::Result<Flow> {
        let month = ask!(self, "Enter month (MM/YYYY): ");
        match self.tracker.reports().monthly_report(&month) {
            Ok(never) => match never {},
            Err(e) => writeln!(self.out, "{}", render::domain_message(&e))?,
        }
        Ok(Flow::Continue)
    }
}
