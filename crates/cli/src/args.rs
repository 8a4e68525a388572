use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ppetrack_core::{DomainError, HospitalCode, ItemCode, SupplierCode};
use ppetrack_inventory::Direction;
use ppetrack_parties::Hospital;

#[derive(Parser, Debug)]
#[command(name = "ppetrack")]
#[command(about = "Track PPE stock, suppliers and hospital distributions", long_about = None)]
pub struct Cli {
    /// JSON configuration file (falls back to PPETRACK_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the resource files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, short = 'u', global = true, env = "PPETRACK_USER")]
    pub username: Option<String>,

    #[arg(long, short = 'p', global = true, env = "PPETRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the inventory, supplier, hospital and distribution files
    Init {
        /// Supplier for a catalog item, as ITEM=SUPPLIER (repeatable)
        #[arg(long = "supplier", value_parser = parse_supplier_assignment)]
        suppliers: Vec<(ItemCode, SupplierCode)>,

        /// Hospital to register, as CODE=NAME (repeatable)
        #[arg(long = "hospital", value_parser = parse_hospital)]
        hospitals: Vec<Hospital>,
    },

    /// Add or remove boxes of an item
    Adjust {
        item: ItemCode,
        /// Number of boxes (must be positive)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        /// add | remove
        direction: Direction,
    },

    /// Remove boxes from stock and record them as shipped to a hospital
    #[command(alias = "dispatch")]
    Distribute {
        item: ItemCode,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        hospital: HospitalCode,
    },

    /// List current stock, flagging low items
    #[command(alias = "track")]
    Inventory,

    /// Total boxes of an item shipped to each hospital
    Search { item: ItemCode },

    /// Suppliers with the items they source
    SupplierReport,

    /// Hospitals with the items shipped to them
    HospitalReport,

    /// Transactions for one month (MM/YYYY)
    MonthlyReport { month: String },

    /// Interactive numbered menu
    Shell,
}

fn parse_supplier_assignment(raw: &str) -> Result<(ItemCode, SupplierCode), DomainError> {
    let (item, supplier) = raw
        .split_once('=')
        .ok_or_else(|| DomainError::validation(format!("expected ITEM=SUPPLIER, got '{raw}'")))?;
    Ok((ItemCode::new(item)?, SupplierCode::new(supplier)?))
}

fn parse_hospital(raw: &str) -> Result<Hospital, DomainError> {
    Hospital::parse_assignment(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_init_assignments() {
        let cli = Cli::try_parse_from([
            "ppetrack",
            "init",
            "--supplier",
            "GL=S02",
            "--hospital",
            "H01=General Hospital",
            "--hospital",
            "H02=District Hospital",
        ])
        .unwrap();

        match cli.command {
            Commands::Init { suppliers, hospitals } => {
                assert_eq!(suppliers.len(), 1);
                assert_eq!(suppliers[0].0.as_str(), "GL");
                assert_eq!(suppliers[0].1.as_str(), "S02");
                let names: Vec<&str> = hospitals.iter().map(|h| h.hospital_name.as_str()).collect();
                assert_eq!(names, vec!["General Hospital", "District Hospital"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn negative_quantities_reach_the_service() {
        let cli = Cli::try_parse_from(["ppetrack", "adjust", "HC", "-5", "remove"]).unwrap();
        match cli.command {
            Commands::Adjust { quantity, direction, .. } => {
                assert_eq!(quantity, -5);
                assert_eq!(direction, Direction::Remove);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_direction_and_bad_assignment() {
        assert!(Cli::try_parse_from(["ppetrack", "adjust", "HC", "5", "sideways"]).is_err());
        assert!(Cli::try_parse_from(["ppetrack", "init", "--supplier", "GL"]).is_err());
    }
}
