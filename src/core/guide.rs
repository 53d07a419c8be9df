use crate::core::profiles::profile;
use crate::domain::model::{AgeQuery, GuideOutcome, GuideRequest, GuideSection};
use crate::domain::ports::GuideProvider;

/// 組出送往指南服務的請求；沒有品種時以物種名稱代替
pub fn build_guide_request(query: &AgeQuery) -> GuideRequest {
    let breed = query.breed.trim();
    let breed = if breed.is_empty() {
        profile(query.species).display_name
    } else {
        breed
    };

    GuideRequest {
        breed: breed.to_string(),
        age: query.age,
    }
}

/// Calls the guide service once. Any failure, including an empty guide, is
/// logged and replaced by [`fallback_guide`].
pub async fn fetch_guide<G>(provider: &G, request: &GuideRequest, human_age: f64) -> GuideOutcome
where
    G: GuideProvider + ?Sized,
{
    match provider.generate(request).await {
        Ok(guide) if !guide.trim().is_empty() => {
            tracing::debug!(breed = %request.breed, bytes = guide.len(), "Health guide generated");
            GuideOutcome::Generated(guide)
        }
        Ok(_) => {
            tracing::warn!(breed = %request.breed, "Health guide service returned an empty guide, using fallback");
            GuideOutcome::Fallback(fallback_guide(&request.breed, request.age, human_age))
        }
        Err(e) => {
            tracing::warn!(breed = %request.breed, error = %e, "Health guide unavailable, using fallback");
            GuideOutcome::Fallback(fallback_guide(&request.breed, request.age, human_age))
        }
    }
}

pub fn life_stage(human_age: f64) -> &'static str {
    if human_age < 18.0 {
        "a youngster"
    } else if human_age < 56.0 {
        "an adult"
    } else {
        "a senior"
    }
}

/// 固定的備用指南，相同輸入一定產生相同文字
pub fn fallback_guide(breed: &str, age: f64, human_age: f64) -> String {
    let age_text = format_number(age, 2);
    let human_text = format_number(human_age, 1);
    let unit = if age_text == "1" { "year" } else { "years" };

    format!(
        "## Health Overview\n\
         Your {breed} is {age_text} {unit} old, which is about {human_text} in human years. \
         At this point in life your pet is {stage}, so keep an eye on changes in appetite, energy and weight.\n\
         \n\
         ## Nutrition\n\
         Feed a complete diet formulated for the life stage of a {age_text}-year-old {breed}. \
         Keep fresh water available at all times and adjust portions to maintain a healthy body condition.\n\
         \n\
         ## Exercise & Enrichment\n\
         Provide daily activity and mental stimulation suited to your pet's age and energy level. \
         Stiffness or reluctance to move can be early signs of joint problems.\n\
         \n\
         ## Veterinary Care\n\
         Schedule a check-up at least once a year, and twice a year for seniors. \
         Keep vaccinations and parasite prevention current and ask your vet about dental care.\n",
        breed = breed,
        age_text = age_text,
        unit = unit,
        human_text = human_text,
        stage = life_stage(human_age),
    )
}

/// 依 `## ` 標題切分指南；第一個標題前的非空文字成為無標題段落
pub fn parse_sections(text: &str) -> Vec<GuideSection> {
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(heading) = line.trim_start().strip_prefix("## ") {
            push_section(&mut sections, title.take(), &body);
            body.clear();
            title = Some(heading.trim().to_string());
        } else {
            body.push(line);
        }
    }
    push_section(&mut sections, title, &body);

    sections
}

fn push_section(sections: &mut Vec<GuideSection>, title: Option<String>, body: &[&str]) {
    let body = body.join("\n").trim().to_string();
    if title.is_none() && body.is_empty() {
        return;
    }
    sections.push(GuideSection { title, body });
}

fn format_number(value: f64, max_decimals: usize) -> String {
    let text = format!("{:.*}", max_decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Species;
    use crate::utils::error::{PetAgeError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedProvider {
        response: std::result::Result<String, String>,
        calls: AtomicUsize,
    }

    impl CannedProvider {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GuideProvider for CannedProvider {
        async fn generate(&self, _request: &GuideRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(|message| PetAgeError::guide_service(message))
        }
    }

    fn request() -> GuideRequest {
        GuideRequest {
            breed: "Beagle".to_string(),
            age: 3.0,
        }
    }

    #[tokio::test]
    async fn test_generated_guide_passes_through() {
        let provider = CannedProvider::ok("## Diet\nFeed well.");
        let outcome = fetch_guide(&provider, &request(), 29.0).await;

        assert_eq!(outcome, GuideOutcome::Generated("## Diet\nFeed well.".to_string()));
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_after_single_attempt() {
        let provider = CannedProvider::failing("500 Internal Server Error");
        let outcome = fetch_guide(&provider, &request(), 29.0).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.text(), fallback_guide("Beagle", 3.0, 29.0));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_whitespace_guide_uses_fallback() {
        let provider = CannedProvider::ok("   \n ");
        let outcome = fetch_guide(&provider, &request(), 29.0).await;
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_fallback_is_deterministic_and_populated() {
        let first = fallback_guide("Great Dane", 7.0, 55.0);
        let second = fallback_guide("Great Dane", 7.0, 55.0);

        assert_eq!(first, second);
        assert!(first.contains("Your Great Dane is 7 years old"));
        assert!(first.contains("about 55 in human years"));
        assert!(first.contains("your pet is an adult"));
        assert_eq!(parse_sections(&first).len(), 4);
    }

    #[test]
    fn test_fallback_formats_fractions() {
        let text = fallback_guide("Syrian", 1.0, 25.0);
        assert!(text.contains("is 1 year old"));

        let text = fallback_guide("Pug", 0.3, 4.5);
        assert!(text.contains("is 0.3 years old"));
        assert!(text.contains("about 4.5 in human years"));
        assert!(text.contains("0.3-year-old Pug"));
    }

    #[test]
    fn test_fallback_unit_follows_displayed_age() {
        assert!(fallback_guide("Pug", 0.999, 14.985).contains("Your Pug is 1 year old"));
        assert!(fallback_guide("Pug", 1.0, 15.0).contains("Your Pug is 1 year old"));
        assert!(fallback_guide("Pug", 1.004, 15.06).contains("Your Pug is 1 year old"));
        assert!(fallback_guide("Pug", 1.5, 19.5).contains("Your Pug is 1.5 years old"));
    }

    #[test]
    fn test_parse_sections() {
        let text = "Intro line\n\n## Diet\nFeed twice daily.\n\n## Exercise\nWalk.\nPlay.\n";
        let sections = parse_sections(text);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[0].body, "Intro line");
        assert_eq!(sections[1].title.as_deref(), Some("Diet"));
        assert_eq!(sections[1].body, "Feed twice daily.");
        assert_eq!(sections[2].body, "Walk.\nPlay.");
    }

    #[test]
    fn test_parse_sections_without_headings() {
        assert!(parse_sections("").is_empty());
        let sections = parse_sections("Just some advice.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, None);
    }

    #[test]
    fn test_build_guide_request_uses_species_name_without_breed() {
        let query = AgeQuery {
            species: Species::Hamster,
            age: 2.0,
            breed: "  ".to_string(),
        };
        assert_eq!(build_guide_request(&query).breed, "Hamster");

        let query = AgeQuery {
            species: Species::Dog,
            age: 2.0,
            breed: "Pug".to_string(),
        };
        assert_eq!(
            build_guide_request(&query),
            GuideRequest {
                breed: "Pug".to_string(),
                age: 2.0
            }
        );
    }

    #[test]
    fn test_life_stage() {
        assert_eq!(life_stage(7.5), "a youngster");
        assert_eq!(life_stage(36.0), "an adult");
        assert_eq!(life_stage(56.0), "a senior");
    }
}
