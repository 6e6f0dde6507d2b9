//! Records displayed when the experiences endpoint cannot be reached.

use chrono::{DateTime, Utc};

use crate::entities::experience::{EmploymentType, Experience, WorkLocation};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn leadership(
    id: &str,
    role: &str,
    organization: &str,
    start_date: &str,
    end_date: Option<&str>,
    location: WorkLocation,
    tools: &[&str],
    achievements: &[&str],
) -> Experience {
    Experience {
        id: id.to_string(),
        role: role.to_string(),
        organization: organization.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.map(str::to_string),
        location,
        kind: EmploymentType::Leadership,
        achievements: strings(achievements),
        tools: strings(tools),
        featured: false,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Leadership roles shown on the about page while offline.
pub fn sample_experiences() -> Vec<Experience> {
    vec![
        leadership(
            "fallback-1",
            "Internship Coordinator",
            "Coimbatore Institute of Technology",
            "Jun 2025",
            None,
            WorkLocation::Onsite,
            &["Event Management", "Industry Relations", "Market Research"],
            &[
                "Organized events with 300+ attendees",
                "Analyzed trends across 15+ industries",
                "Connected students with employers",
            ],
        ),
        leadership(
            "fallback-2",
            "Student Advisor",
            "403 Strategists",
            "Jun 2024",
            Some("Apr 2025"),
            WorkLocation::Remote,
            &["Leadership Development", "Event Planning", "Strategic Recruitment"],
            &[
                "Mentored 25+ students",
                "Achieved 95% event success rate",
                "Increased membership by 40%",
            ],
        ),
        leadership(
            "fallback-3",
            "Head of Internal Affairs",
            "Datalytics Club",
            "Jun 2022",
            Some("Mar 2023"),
            WorkLocation::Onsite,
            &["Team Management", "Process Improvement", "Event Execution"],
            &[
                "Conducted 48+ weekly meetings",
                "Increased efficiency by 30%",
                "Executed 12+ events successfully",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_roles_are_leadership_entries() {
        let experiences = sample_experiences();

        assert_eq!(experiences.len(), 3);
        assert!(experiences.iter().all(|e| e.kind.is_leadership()));
        assert!(experiences[0].is_ongoing());
        assert_eq!(experiences[1].end_date.as_deref(), Some("Apr 2025"));
    }
}
