use crate::axis::ScaleKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Domain value not found: {0}")]
    DomainValueNotFound(String),

    #[error("Scale of kind {0} cannot be inverted")]
    NotInvertible(ScaleKind),
}
