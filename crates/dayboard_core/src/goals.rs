use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: u64,
    pub title: String,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalGroup {
    pub id: u64,
    pub title: String,
    pub color: String,
    pub goals: Vec<Goal>,
}

impl GoalGroup {
    pub fn progress(&self) -> (usize, usize) {
        let done = self.goals.iter().filter(|goal| goal.done).count();
        (done, self.goals.len())
    }
}

/// Named groups of goals, each goal either open or done.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalBoard {
    groups: Vec<GoalGroup>,
    next_id: u64,
}

impl GoalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[GoalGroup] {
        &self.groups
    }

    pub fn group(&self, group_id: u64) -> Option<&GoalGroup> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// Appends a group. Blank titles are ignored.
    pub fn add_group(&mut self, title: &str, color: &str) -> Option<u64> {
        if title.trim().is_empty() {
            return None;
        }
        let id = self.allocate_id();
        self.groups.push(GoalGroup {
            id,
            title: title.to_string(),
            color: color.to_string(),
            goals: Vec::new(),
        });
        Some(id)
    }

    /// Appends an open goal to a group. Blank titles and unknown groups are ignored.
    pub fn add_goal(&mut self, group_id: u64, title: &str) -> Option<u64> {
        if title.trim().is_empty() {
            return None;
        }
        let index = self.groups.iter().position(|group| group.id == group_id)?;
        let id = self.allocate_id();
        self.groups[index].goals.push(Goal {
            id,
            title: title.to_string(),
            done: false,
        });
        Some(id)
    }

    /// Flips a goal between open and done. Returns false when nothing matched.
    pub fn toggle_goal(&mut self, group_id: u64, goal_id: u64) -> bool {
        let goal = self
            .groups
            .iter_mut()
            .find(|group| group.id == group_id)
            .and_then(|group| group.goals.iter_mut().find(|goal| goal.id == goal_id));
        match goal {
            Some(goal) => {
                goal.done = !goal.done;
                true
            }
            None => false,
        }
    }

    pub fn progress(&self, group_id: u64) -> Option<(usize, usize)> {
        self.group(group_id).map(GoalGroup::progress)
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}
