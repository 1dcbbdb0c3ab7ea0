//! Default school data for a fresh database.
//!
//! Activities are written key-only: they name their category and teachers
//! but carry no embedded snapshots, so the first read or repair sweep fills
//! them in.

use chrono::NaiveTime;
use mergington_shared::{Activity, Category, Email, Role, ScheduleDetails, Teacher};

use crate::database::Database;
use crate::error::Result;
use crate::repository::{ActivityStore, CategoryStore, TeacherStore};

/// Counts of records written by [`seed_defaults`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub categories: usize,
    pub teachers: usize,
    pub activities: usize,
}

impl SeedStats {
    pub fn is_empty(&self) -> bool {
        self.categories == 0 && self.teachers == 0 && self.activities == 0
    }
}

const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("sports", "Esportes", "#28a745", "Atividades físicas e esportivas"),
    ("arts", "Artes", "#6f42c1", "Atividades artísticas e criativas"),
    ("academic", "Acadêmico", "#007bff", "Atividades educacionais e acadêmicas"),
    ("technology", "Tecnologia", "#17a2b8", "Atividades relacionadas à tecnologia"),
    ("community", "Comunidade", "#fd7e14", "Atividades de serviço comunitário"),
];

const TEACHERS: &[(&str, &str, Role)] = &[
    ("maria", "Maria Rodriguez", Role::Teacher),
    ("jose", "Prof. Jose Chen", Role::Teacher),
    ("paulo", "Paulo Silva", Role::Admin),
];

struct SeedActivity {
    name: &'static str,
    description: &'static str,
    days: &'static [&'static str],
    start: (u32, u32),
    end: (u32, u32),
    max_participants: u32,
    category: &'static str,
    teachers: &'static [&'static str],
    participants: &'static [&'static str],
}

const ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Clube de Xadrez",
        description: "Desenvolva estratégias de pensamento crítico através do xadrez",
        days: &["Tuesday", "Thursday"],
        start: (15, 30),
        end: (17, 0),
        max_participants: 20,
        category: "academic",
        teachers: &["jose"],
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Clube de Programação",
        description: "Aprenda fundamentos de programação com Java e Python",
        days: &["Monday", "Wednesday", "Friday"],
        start: (14, 0),
        end: (15, 30),
        max_participants: 15,
        category: "technology",
        teachers: &["jose"],
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Clube de Arte",
        description: "Explore sua criatividade através de diversas formas de arte",
        days: &["Tuesday", "Thursday"],
        start: (16, 0),
        end: (17, 30),
        max_participants: 25,
        category: "arts",
        teachers: &["maria"],
        participants: &["amelia@mergington.edu", "harper@mergington.edu"],
    },
    SeedActivity {
        name: "Time de Futebol",
        description: "Equipe competitiva de futebol da escola",
        days: &["Monday", "Wednesday", "Friday"],
        start: (16, 0),
        end: (18, 0),
        max_participants: 30,
        category: "sports",
        teachers: &["maria"],
        participants: &["liam@mergington.edu", "noah@mergington.edu"],
    },
    SeedActivity {
        name: "Banda de Música",
        description: "Banda escolar para estudantes com experiência musical",
        days: &["Tuesday", "Thursday"],
        start: (15, 0),
        end: (16, 30),
        max_participants: 35,
        category: "arts",
        teachers: &["maria", "jose"],
        participants: &[],
    },
    SeedActivity {
        name: "Serviço Comunitário",
        description: "Projetos de serviço comunitário e voluntariado",
        days: &["Saturday"],
        start: (9, 0),
        end: (12, 0),
        max_participants: 40,
        category: "community",
        teachers: &["maria", "jose"],
        participants: &[],
    },
];

/// Insert the default categories, teachers, and activities when the
/// database holds no activities yet. Every seeded teacher gets `password`.
pub fn seed_defaults(db: &Database, password: &str) -> Result<SeedStats> {
    let mut stats = SeedStats::default();

    if !db.list_activities()?.is_empty() {
        tracing::debug!("activities present, skipping seed");
        return Ok(stats);
    }

    for (id, label, color, description) in CATEGORIES {
        if db.category_exists(id)? {
            continue;
        }
        let category = Category::new(id, label, color, "#ffffff", Some(description.to_string()))?;
        db.save_category(&category)?;
        stats.categories += 1;
    }

    for (username, display_name, role) in TEACHERS {
        if db.teacher_exists(username)? {
            continue;
        }
        db.save_teacher(&Teacher::new(username, display_name, password, Some(*role))?)?;
        stats.teachers += 1;
    }

    for seed in ACTIVITIES {
        let schedule = ScheduleDetails::new(
            seed.days.iter().map(|d| d.to_string()).collect(),
            time(seed.start),
            time(seed.end),
        )?;
        let participants = seed
            .participants
            .iter()
            .map(|e| Email::parse(e))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut activity = Activity::new(
            seed.name,
            seed.description,
            schedule,
            seed.max_participants,
            Some(seed.category),
        )?
        .with_participants(participants)?;
        for username in seed.teachers {
            activity.assign_teacher(username);
        }
        db.save_activity(&activity)?;
        stats.activities += 1;
    }

    tracing::info!(
        categories = stats.categories,
        teachers = stats.teachers,
        activities = stats.activities,
        "seeded default data"
    );
    Ok(stats)
}

fn time((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();

        let first = seed_defaults(&db, "changeme").unwrap();
        assert_eq!(
            first,
            SeedStats {
                categories: 5,
                teachers: 3,
                activities: 6,
            }
        );
        assert!(seed_defaults(&db, "changeme").unwrap().is_empty());
    }

    #[test]
    fn seeded_activities_are_key_only() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        seed_defaults(&db, "changeme").unwrap();

        let band = db.get_activity("Banda de Música").unwrap().unwrap();
        assert_eq!(band.category_id(), Some("arts"));
        assert!(band.category().is_none());
        assert_eq!(band.assigned_teacher_usernames(), ["maria".to_string(), "jose".to_string()]);
        assert!(band.assigned_teachers().is_empty());

        let paulo = db.get_teacher("paulo").unwrap().unwrap();
        assert!(paulo.is_admin());
    }
}
