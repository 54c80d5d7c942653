mod criteria_builder;
mod rrset_projector;

pub use criteria_builder::CriteriaBuilder;
pub use rrset_projector::RRsetProjector;
