//! Console rendering of service results and failures.

use std::io::{self, Write};

use ppetrack_core::{DomainError, HospitalCode, ItemCode};
use ppetrack_distribution::{DistributionRecord, Tally};
use ppetrack_infra::reports::{HospitalReport, SupplierReport};
use ppetrack_infra::{Dispatched, InitOutcome, Resource, ServiceError, StockLine, StoreError};
use ppetrack_inventory::InventoryItem;

pub fn init_outcome(out: &mut impl Write, outcome: &InitOutcome) -> io::Result<()> {
    match outcome {
        InitOutcome::AlreadyInitialized => writeln!(out, "Inventory already created."),
        InitOutcome::Initialized {
            items,
            suppliers,
            hospitals,
        } => {
            writeln!(out, "Inventory creation completed ({items} items).")?;
            writeln!(out, "Suppliers file created ({suppliers} suppliers).")?;
            writeln!(out, "Hospitals file created ({hospitals} hospitals).")
        }
    }
}

pub fn adjusted(out: &mut impl Write, item: &InventoryItem) -> io::Result<()> {
    writeln!(
        out,
        "Inventory updated for {}. Current stock: {}",
        item.item_code, item.quantity
    )
}

pub fn recorded(out: &mut impl Write, record: &DistributionRecord) -> io::Result<()> {
    writeln!(
        out,
        "Recorded distribution: {}, {} boxes to hospital {}.",
        record.item_code, record.quantity, record.hospital_code
    )
}

pub fn dispatched(out: &mut impl Write, dispatched: &Dispatched) -> io::Result<()> {
    adjusted(out, &dispatched.item)?;
    recorded(out, &dispatched.record)
}

pub fn inventory(out: &mut impl Write, lines: &[StockLine]) -> io::Result<()> {
    writeln!(out, "Current Inventory:")?;
    for line in lines {
        let item = &line.item;
        writeln!(
            out,
            "{} ({}): {} boxes from {}",
            item.item_code, item.item_name, item.quantity, item.supplier_code
        )?;
        if line.low_stock {
            writeln!(
                out,
                "Warning: Low stock on {} - only {} boxes remaining!",
                item.item_code, item.quantity
            )?;
        }
    }
    Ok(())
}

pub fn distribution_totals(
    out: &mut impl Write,
    item_code: &ItemCode,
    totals: &Tally<HospitalCode>,
) -> io::Result<()> {
    if totals.is_empty() {
        return writeln!(out, "No distributions found for this item.");
    }
    writeln!(out, "Distribution list for {item_code}:")?;
    for (hospital, quantity) in totals.iter() {
        writeln!(out, "Hospital {hospital}: {quantity} boxes")?;
    }
    Ok(())
}

pub fn supplier_report(out: &mut impl Write, report: &SupplierReport) -> io::Result<()> {
    writeln!(out, "Supplier Report:")?;
    for entry in report.entries() {
        let supplier = entry.supplier;
        writeln!(
            out,
            "Supplier Code: {}, Name: {}, Location: {}",
            supplier.supplier_code, supplier.name, supplier.location
        )?;
        writeln!(out, "Supplies:")?;
        for item in entry.items() {
            writeln!(out, "  - {} ({})", item.item_code, item.item_name)?;
        }
    }
    Ok(())
}

pub fn hospital_report(out: &mut impl Write, report: &HospitalReport) -> io::Result<()> {
    writeln!(out, "Hospital Report:")?;
    for entry in report.entries() {
        let hospital = entry.hospital;
        writeln!(
            out,
            "Hospital: {} (Code: {})",
            hospital.hospital_name, hospital.hospital_code
        )?;
        for (item_code, quantity) in entry.items() {
            writeln!(out, "  - {item_code}: {quantity} boxes")?;
        }
    }
    Ok(())
}

/// Operator-facing message for a failed operation.
pub fn failure_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Domain(e) => domain_message(e),
        ServiceError::Store(StoreError::ResourceMissing { resource, .. }) => {
            format!("{} file not found.", resource_label(*resource))
        }
        ServiceError::Store(e) => format!("Error: {e}"),
    }
}

pub fn domain_message(err: &DomainError) -> String {
    match err {
        DomainError::InsufficientStock {
            item_code,
            available,
            ..
        } => format!("Insufficient stock for {item_code}. Current stock: {available}"),
        DomainError::ItemNotFound(code) => format!("Item {code} not found."),
        DomainError::InvalidQuantity(msg) => format!("Invalid quantity: {msg}."),
        DomainError::Validation(msg) => format!("Invalid input: {msg}."),
        DomainError::NotImplemented(what) => format!("Not available yet: {what}."),
    }
}

fn resource_label(resource: Resource) -> &'static str {
    match resource {
        Resource::Inventory => "Inventory",
        Resource::Suppliers => "Suppliers",
        Resource::Hospitals => "Hospitals",
        Resource::Distribution => "Distribution",
    }
}
