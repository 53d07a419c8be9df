pub mod age;
pub mod batch;
pub mod converter;
pub mod form;
pub mod guide;
pub mod profiles;

pub use crate::domain::model::{
    AgeQuery, AgeResult, BreedSizeClass, ConversionReport, FormInput, GuideOutcome, GuideRequest,
    Species, SpeciesProfile,
};
pub use crate::domain::ports::{ConfigProvider, GuideProvider};
pub use crate::utils::error::Result;
