//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RegistryError`] via `From`. Validation failures carry the
//! user-facing (Ukrainian) message as their `Display` output.

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The submitted data or query violated a domain rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying storage failed (connection loss, constraint violation, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level validation failures.
///
/// Variants are listed in the order the validator checks them; the first
/// failing rule wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Вкажіть адресу.")]
    EmptyAddress,

    #[error("Оберіть коректний тип підстанції.")]
    InvalidType,

    #[error("Кількість квартир має бути додатним числом.")]
    InvalidApartmentsCount,

    #[error("Потужність має бути додатним числом.")]
    InvalidPower,

    #[error("Вкажіть коректну дату останнього ремонту.")]
    InvalidDate,

    /// Raised while building a listing plan, not during creation.
    #[error("Некоректний фільтр типу.")]
    InvalidTypeFilter,
}

/// Problems with a configured set of substation type labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("at least one substation type label is required")]
    Empty,

    #[error("substation type labels must not be blank")]
    BlankLabel,

    #[error("duplicate substation type label {0:?}")]
    DuplicateLabel(String),

    #[error("{0:?} is reserved for the \"any type\" filter")]
    ReservedLabel(String),
}
