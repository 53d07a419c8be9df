use crate::core::age::CAT_CURVE;
use crate::domain::model::{AgeFormula, Species, SpeciesProfile};
use crate::utils::error::PetAgeError;
use std::str::FromStr;

/// 品種下拉選單中代表「自行輸入」的選項
pub const OTHER_BREED: &str = "other";

static DOG: SpeciesProfile = SpeciesProfile {
    species: Species::Dog,
    display_name: "Dog",
    typical_lifespan: "10-13 years",
    age_formula: AgeFormula::DogBySize,
    breed_options: &[
        "Labrador Retriever",
        "Golden Retriever",
        "German Shepherd",
        "Great Dane",
        "Rottweiler",
        "Beagle",
        "Bulldog",
        "Poodle",
        "Border Collie",
        "Chihuahua",
        "Pomeranian",
        "Yorkshire Terrier",
        "Dachshund",
        "Shih Tzu",
        "Pug",
    ],
};

static CAT: SpeciesProfile = SpeciesProfile {
    species: Species::Cat,
    display_name: "Cat",
    typical_lifespan: "12-18 years",
    age_formula: AgeFormula::Piecewise(CAT_CURVE),
    breed_options: &[
        "Domestic Shorthair",
        "Siamese",
        "Persian",
        "Maine Coon",
        "Ragdoll",
        "Bengal",
        "British Shorthair",
    ],
};

static RABBIT: SpeciesProfile = SpeciesProfile {
    species: Species::Rabbit,
    display_name: "Rabbit",
    typical_lifespan: "8-12 years",
    age_formula: AgeFormula::Linear { factor: 8.0 },
    breed_options: &[
        "Holland Lop",
        "Netherland Dwarf",
        "Mini Rex",
        "Lionhead",
        "Flemish Giant",
    ],
};

static HAMSTER: SpeciesProfile = SpeciesProfile {
    species: Species::Hamster,
    display_name: "Hamster",
    typical_lifespan: "2-3 years",
    age_formula: AgeFormula::Linear { factor: 25.0 },
    breed_options: &[
        "Syrian",
        "Dwarf Campbell",
        "Winter White",
        "Roborovski",
        "Chinese",
    ],
};

static BIRD: SpeciesProfile = SpeciesProfile {
    species: Species::Bird,
    display_name: "Bird",
    typical_lifespan: "5-20 years (varies widely by species)",
    age_formula: AgeFormula::Linear { factor: 7.0 },
    breed_options: &["Budgerigar", "Cockatiel", "Lovebird", "Canary", "African Grey"],
};

pub fn profile(species: Species) -> &'static SpeciesProfile {
    match species {
        Species::Dog => &DOG,
        Species::Cat => &CAT,
        Species::Rabbit => &RABBIT,
        Species::Hamster => &HAMSTER,
        Species::Bird => &BIRD,
    }
}

pub fn all_profiles() -> impl Iterator<Item = &'static SpeciesProfile> {
    Species::ALL.into_iter().map(profile)
}

impl SpeciesProfile {
    /// 只有狗需要品種才能計算
    pub fn requires_breed(&self) -> bool {
        matches!(self.age_formula, AgeFormula::DogBySize)
    }
}

impl FromStr for Species {
    type Err = PetAgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Species::ALL
            .into_iter()
            .find(|species| species.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Species::ALL.iter().map(Species::id).collect();
                PetAgeError::validation(
                    "species",
                    format!("unknown species '{}'. Known species: {}", wanted, known.join(", ")),
                )
            })
    }
}
