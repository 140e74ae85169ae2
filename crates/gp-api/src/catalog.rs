//! Static game catalog.
//!
//! The catalog is the source of truth for which games exist per grade.
//! Games are materialized into the database lazily on first access, so a
//! catalog entry with no database row is a game nobody has opened yet.

/// One catalog entry, identified by (grade, id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGame {
    pub id: i32,
    pub grade: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub thumbnail_url: &'static str,
    pub play_url: &'static str,
}

pub const GAMES: &[CatalogGame] = &[
    CatalogGame {
        id: 1,
        grade: "K",
        title: "Counting Critters",
        description: "Count friendly animals to build early number sense.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/counting-critters.png",
        play_url: "https://games.gradeplay.app/embed/counting-critters",
    },
    CatalogGame {
        id: 2,
        grade: "K",
        title: "Shape Sorter",
        description: "Match circles, squares and triangles against the clock.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/shape-sorter.png",
        play_url: "https://games.gradeplay.app/embed/shape-sorter",
    },
    CatalogGame {
        id: 3,
        grade: "K",
        title: "Letter Lagoon",
        description: "Fish for letters and spell your first words.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/letter-lagoon.png",
        play_url: "https://games.gradeplay.app/embed/letter-lagoon",
    },
    CatalogGame {
        id: 1,
        grade: "1st",
        title: "Number Ninja",
        description: "Slice the right answers to addition and subtraction problems.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/number-ninja.png",
        play_url: "https://games.gradeplay.app/embed/number-ninja",
    },
    CatalogGame {
        id: 2,
        grade: "1st",
        title: "Word Wizard",
        description: "Build sight-word vocabulary with magical spelling puzzles.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/word-wizard.png",
        play_url: "https://games.gradeplay.app/embed/word-wizard",
    },
    CatalogGame {
        id: 1,
        grade: "2nd",
        title: "Memory Meadow",
        description: "Flip cards and train memory with matching pairs.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/memory-meadow.png",
        play_url: "https://games.gradeplay.app/embed/memory-meadow",
    },
    CatalogGame {
        id: 2,
        grade: "2nd",
        title: "Math Mountain",
        description: "Climb higher by solving two-digit addition chains.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/math-mountain.png",
        play_url: "https://games.gradeplay.app/embed/math-mountain",
    },
    CatalogGame {
        id: 1,
        grade: "3rd",
        title: "Fraction Factory",
        description: "Assemble pizzas and pies to master simple fractions.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/fraction-factory.png",
        play_url: "https://games.gradeplay.app/embed/fraction-factory",
    },
    CatalogGame {
        id: 2,
        grade: "3rd",
        title: "Logic Labyrinth",
        description: "Navigate mazes by solving pattern and sequence puzzles.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/logic-labyrinth.png",
        play_url: "https://games.gradeplay.app/embed/logic-labyrinth",
    },
    CatalogGame {
        id: 1,
        grade: "4th",
        title: "Multiplication Marathon",
        description: "Race through times tables to reach the finish line.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/multiplication-marathon.png",
        play_url: "https://games.gradeplay.app/embed/multiplication-marathon",
    },
    CatalogGame {
        id: 2,
        grade: "4th",
        title: "Grammar Galaxy",
        description: "Pilot a spaceship by picking the right parts of speech.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/grammar-galaxy.png",
        play_url: "https://games.gradeplay.app/embed/grammar-galaxy",
    },
    CatalogGame {
        id: 1,
        grade: "5th",
        title: "Decimal Dash",
        description: "Sprint through decimal comparisons and conversions.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/decimal-dash.png",
        play_url: "https://games.gradeplay.app/embed/decimal-dash",
    },
    CatalogGame {
        id: 2,
        grade: "5th",
        title: "Geometry Quest",
        description: "Hunt for angles and areas across an adventure map.",
        thumbnail_url: "https://cdn.gradeplay.app/thumbs/geometry-quest.png",
        play_url: "https://games.gradeplay.app/embed/geometry-quest",
    },
];

/// Look up a catalog entry by its (grade, id) key.
pub fn find(grade: &str, id: i32) -> Option<&'static CatalogGame> {
    GAMES
        .iter()
        .find(|game| game.grade == grade && game.id == id)
}

/// All catalog entries for one grade, in catalog order.
pub fn for_grade(grade: &str) -> Vec<&'static CatalogGame> {
    GAMES.iter().filter(|game| game.grade == grade).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::VALID_GRADES;

    #[test]
    fn test_find_by_key() {
        let game = find("K", 1).expect("K/1 should exist");
        assert_eq!(game.title, "Counting Critters");

        assert!(find("K", 999).is_none());
        assert!(find("12th", 1).is_none());
    }

    #[test]
    fn test_for_grade() {
        let games = for_grade("K");
        assert_eq!(games.len(), 3);
        assert!(games.iter().all(|game| game.grade == "K"));

        assert!(for_grade("6th").is_empty());
    }

    #[test]
    fn test_catalog_is_consistent() {
        for game in GAMES {
            // Every entry belongs to a served grade and has a unique key
            assert!(VALID_GRADES.contains(&game.grade), "grade {}", game.grade);
            assert_eq!(
                GAMES
                    .iter()
                    .filter(|other| other.grade == game.grade && other.id == game.id)
                    .count(),
                1,
                "duplicate key {}/{}",
                game.grade,
                game.id
            );
            assert!(!game.title.is_empty());
            assert!(game.play_url.starts_with("https://"));
        }
    }
}
