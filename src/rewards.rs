use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::db::{Collections, User, UserRepository, UserRole};

/// Badge thresholds, cumulative XP. Badges are append-only: once earned,
/// never removed.
pub const BADGE_THRESHOLDS: [(u32, &str); 4] = [
    (50, "Newcomer"),
    (100, "Active Participant"),
    (250, "Event Enthusiast"),
    (500, "Campus Legend"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpTier {
    Participant,
    WinnerThird,
    WinnerSecond,
    WinnerFirst,
}

impl XpTier {
    /// Prize positions are free text ("1st Place", "Runner-up");
    /// classification is a case-insensitive substring match, anything
    /// unrecognized falls back to the participant tier.
    pub fn from_position(position: &str) -> Self {
        let position = position.to_lowercase();
        if position.contains("first") {
            XpTier::WinnerFirst
        } else if position.contains("second") {
            XpTier::WinnerSecond
        } else if position.contains("third") {
            XpTier::WinnerThird
        } else {
            XpTier::Participant
        }
    }

    pub fn points(self) -> u32 {
        match self {
            XpTier::Participant => 10,
            XpTier::WinnerThird => 20,
            XpTier::WinnerSecond => 30,
            XpTier::WinnerFirst => 50,
        }
    }
}

fn apply_award(user: &mut User, points: u32, now: OffsetDateTime) {
    user.xp += points;
    for (threshold, badge) in BADGE_THRESHOLDS {
        if user.xp >= threshold && !user.badges.iter().any(|b| b == badge) {
            user.badges.push(badge.to_string());
        }
    }
    user.updated_at = now;
}

/// Awards `points` to every listed user with the STUDENT role. Each award
/// stands alone: a user that has vanished is logged and skipped so the rest
/// still receive theirs. At-most-once semantics per (participant, event)
/// are the caller's responsibility.
pub fn award_xp(col: &mut Collections, user_ids: &[Uuid], points: u32, now: OffsetDateTime) {
    for &user_id in user_ids {
        match UserRepository::get_mut(col, user_id) {
            Some(user) if user.role == UserRole::Student => apply_award(user, points, now),
            Some(_) => {}
            None => warn!(%user_id, points, "skipping XP award for unknown user"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub xp: u32,
    pub badges: Vec<String>,
}

/// Students ordered by XP descending. Equal XP is ordered by account
/// creation time, then id, so the ranking is stable across calls.
pub fn leaderboard(col: &Collections, limit: usize) -> Vec<LeaderboardEntry> {
    let mut students: Vec<&User> = UserRepository::students(col).collect();
    students.sort_by(|a, b| {
        b.xp.cmp(&a.xp)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    students
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            rank: index + 1,
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            xp: user.xp,
            badges: user.badges.clone(),
        })
        .collect()
}

/// 1 + the number of students with strictly more XP; tied students share a
/// rank. Non-students are unranked.
pub fn user_rank(col: &Collections, user_id: Uuid) -> Option<usize> {
    let user = UserRepository::get(col, user_id)?;
    if user.role != UserRole::Student {
        return None;
    }
    let higher = UserRepository::students(col)
        .filter(|u| u.xp > user.xp)
        .count();
    Some(higher + 1)
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use time::macros::datetime;
    use uuid::Uuid;

    use super::{XpTier, award_xp, leaderboard, user_rank};
    use crate::db::{Collections, User, UserRole};

    const NOW: OffsetDateTime = datetime!(2026-02-01 00:00 UTC);

    fn student(name: &str, xp: u32, created_at: OffsetDateTime) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@campus.edu", name.to_lowercase()),
            role: UserRole::Student,
            society_name: None,
            favorite_categories: Vec::new(),
            xp,
            badges: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn tier_classification_is_case_insensitive_substring_match() {
        assert_eq!(XpTier::from_position("1st Place (First)"), XpTier::WinnerFirst);
        assert_eq!(XpTier::from_position("SECOND runner"), XpTier::WinnerSecond);
        assert_eq!(XpTier::from_position("third"), XpTier::WinnerThird);
        assert_eq!(XpTier::from_position("Best Costume"), XpTier::Participant);
    }

    #[test]
    fn tier_points() {
        assert_eq!(XpTier::Participant.points(), 10);
        assert_eq!(XpTier::WinnerThird.points(), 20);
        assert_eq!(XpTier::WinnerSecond.points(), 30);
        assert_eq!(XpTier::WinnerFirst.points(), 50);
    }

    #[test]
    fn award_crossing_one_threshold_grants_only_that_badge() {
        let mut col = Collections::default();
        let mut user = student("asha", 0, NOW);
        user.xp = 40;
        let id = user.id;
        col.users.insert(id, user);

        award_xp(&mut col, &[id], 50, NOW);

        let user = &col.users[&id];
        assert_eq!(user.xp, 90);
        assert_eq!(user.badges, vec!["Newcomer".to_string()]);
    }

    #[test]
    fn award_crossing_several_thresholds_grants_all_of_them() {
        let mut col = Collections::default();
        let user = student("vik", 0, NOW);
        let id = user.id;
        col.users.insert(id, user);

        award_xp(&mut col, &[id], 260, NOW);

        let user = &col.users[&id];
        assert_eq!(
            user.badges,
            vec![
                "Newcomer".to_string(),
                "Active Participant".to_string(),
                "Event Enthusiast".to_string()
            ]
        );
    }

    #[test]
    fn non_students_and_missing_users_are_skipped() {
        let mut col = Collections::default();
        let mut admin = student("admin", 0, NOW);
        admin.role = UserRole::SuperAdmin;
        let admin_id = admin.id;
        col.users.insert(admin_id, admin);

        award_xp(&mut col, &[admin_id, Uuid::new_v4()], 50, NOW);

        assert_eq!(col.users[&admin_id].xp, 0);
    }

    #[test]
    fn leaderboard_orders_by_xp_then_creation_time() {
        let mut col = Collections::default();
        let early = student("early", 100, datetime!(2026-01-01 00:00 UTC));
        let late = student("late", 100, datetime!(2026-01-02 00:00 UTC));
        let top = student("top", 300, NOW);
        let early_id = early.id;
        let late_id = late.id;
        let top_id = top.id;
        for u in [early, late, top] {
            col.users.insert(u.id, u);
        }

        let board = leaderboard(&col, 10);
        let ids: Vec<_> = board.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, vec![top_id, early_id, late_id]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[2].rank, 3);

        assert_eq!(leaderboard(&col, 2).len(), 2);
    }

    #[test]
    fn tied_students_share_a_rank() {
        let mut col = Collections::default();
        let a = student("a", 200, NOW);
        let b = student("b", 200, NOW);
        let c = student("c", 50, NOW);
        let a_id = a.id;
        let b_id = b.id;
        let c_id = c.id;
        for u in [a, b, c] {
            col.users.insert(u.id, u);
        }

        assert_eq!(user_rank(&col, a_id), Some(1));
        assert_eq!(user_rank(&col, b_id), Some(1));
        assert_eq!(user_rank(&col, c_id), Some(3));
    }

    #[test]
    fn sole_top_student_ranks_first_among_five() {
        let mut col = Collections::default();
        let mut ids = Vec::new();
        for (i, xp) in [10u32, 20, 30, 40, 90].iter().enumerate() {
            let u = student(&format!("s{i}"), *xp, NOW);
            ids.push(u.id);
            col.users.insert(u.id, u);
        }
        assert_eq!(user_rank(&col, ids[4]), Some(1));
        assert_eq!(user_rank(&col, ids[0]), Some(5));
    }

    #[test]
    fn non_student_has_no_rank() {
        let mut col = Collections::default();
        let mut admin = student("admin", 500, NOW);
        admin.role = UserRole::SocietyAdmin;
        let id = admin.id;
        col.users.insert(id, admin);

        assert_eq!(user_rank(&col, id), None);
    }
}
