//! Human-equivalent age formulas.

use crate::core::profiles::profile;
use crate::domain::model::{AgeFormula, AgeQuery, AgeResult, BreedSizeClass, PiecewiseCurve, Species};

/// 小型犬品種（小寫，子字串比對）
pub const SMALL_BREEDS: &[&str] = &[
    "chihuahua",
    "pomeranian",
    "yorkshire terrier",
    "yorkie",
    "maltese",
    "shih tzu",
    "toy poodle",
    "miniature poodle",
    "dachshund",
    "pug",
    "papillon",
    "pekingese",
    "boston terrier",
    "miniature schnauzer",
    "bichon frise",
    "cavalier king charles spaniel",
    "jack russell terrier",
    "french bulldog",
];

/// 大型犬品種（小寫，子字串比對）
pub const LARGE_BREEDS: &[&str] = &[
    "great dane",
    "golden retriever",
    "labrador",
    "german shepherd",
    "rottweiler",
    "mastiff",
    "saint bernard",
    "st. bernard",
    "bernese mountain dog",
    "newfoundland",
    "doberman",
    "irish wolfhound",
    "great pyrenees",
    "akita",
    "alaskan malamute",
    "leonberger",
    "bloodhound",
];

pub const SMALL_DOG_CURVE: PiecewiseCurve = PiecewiseCurve {
    first_year: 15.0,
    breakpoint: 2.0,
    mid_rate: 9.0,
    late_rate: 4.0,
};

pub const LARGE_DOG_CURVE: PiecewiseCurve = PiecewiseCurve {
    first_year: 15.0,
    breakpoint: 5.0,
    mid_rate: 7.0,
    late_rate: 6.0,
};

pub const MEDIUM_DOG_CURVE: PiecewiseCurve = PiecewiseCurve {
    first_year: 15.0,
    breakpoint: 2.0,
    mid_rate: 9.0,
    late_rate: 5.0,
};

// 貓不分品種，共用一條曲線；常數與小型犬相同但刻意分開維護
pub const CAT_CURVE: PiecewiseCurve = PiecewiseCurve {
    first_year: 15.0,
    breakpoint: 2.0,
    mid_rate: 9.0,
    late_rate: 4.0,
};

impl PiecewiseCurve {
    pub fn evaluate(&self, age: f64) -> f64 {
        if age <= 1.0 {
            age * self.first_year
        } else if age <= self.breakpoint {
            self.first_year + (age - 1.0) * self.mid_rate
        } else {
            self.value_at_breakpoint() + (age - self.breakpoint) * self.late_rate
        }
    }

    /// 第二段在斷點的值，也是第三段的起點
    pub fn value_at_breakpoint(&self) -> f64 {
        self.first_year + (self.breakpoint - 1.0) * self.mid_rate
    }
}

/// Classifies free-text breed input. Small is checked before large, so text
/// matching both lists is small; anything unmatched (including empty) is
/// unspecified.
pub fn classify_breed(breed: &str) -> BreedSizeClass {
    let text = breed.to_lowercase();

    if SMALL_BREEDS.iter().any(|name| text.contains(name)) {
        BreedSizeClass::Small
    } else if LARGE_BREEDS.iter().any(|name| text.contains(name)) {
        BreedSizeClass::Large
    } else {
        BreedSizeClass::Unspecified
    }
}

pub fn dog_curve(size_class: BreedSizeClass) -> PiecewiseCurve {
    match size_class {
        BreedSizeClass::Small => SMALL_DOG_CURVE,
        BreedSizeClass::Large => LARGE_DOG_CURVE,
        BreedSizeClass::Unspecified => MEDIUM_DOG_CURVE,
    }
}

/// Converts an animal age to a human-equivalent age.
///
/// `age` must be non-negative; callers validate input (see
/// [`crate::core::form`]) before reaching the formula. The result is not
/// rounded.
pub fn compute_human_age(species: Species, breed: &str, age: f64) -> f64 {
    debug_assert!(age >= 0.0, "age must be validated as non-negative before conversion");

    match profile(species).age_formula {
        AgeFormula::DogBySize => dog_curve(classify_breed(breed)).evaluate(age),
        AgeFormula::Piecewise(curve) => curve.evaluate(age),
        AgeFormula::Linear { factor } => age * factor,
    }
}

pub fn convert(query: &AgeQuery) -> AgeResult {
    let size_class = match query.species {
        Species::Dog => Some(classify_breed(&query.breed)),
        _ => None,
    };

    AgeResult {
        human_age: compute_human_age(query.species, &query.breed, query.age),
        size_class,
    }
}

/// 顯示用的四捨五入；計算本身不做捨入
pub fn round_for_display(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(6) as i32);
    (value * factor).round() / factor
}
