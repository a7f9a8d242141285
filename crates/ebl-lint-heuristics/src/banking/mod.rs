//! Banking vertical heuristics.
//!
//! Keyword scans over the whole definition text. They complement the
//! validator's structural checks with compliance hints (PCI-DSS, SOX,
//! fraud screening) that cannot be expressed as dictionary permissions.

mod audit_trail;
mod fraud_screening;
mod pci_dss;
mod sensitive_data;
mod sox;
mod transaction_integrity;
mod wire_transfer;

pub use audit_trail::AuditTrail;
pub use fraud_screening::FraudScreening;
pub use pci_dss::PciDss;
pub use sensitive_data::SensitiveData;
pub use sox::Sox;
pub use transaction_integrity::TransactionIntegrity;
pub use wire_transfer::WireTransfer;
