use serde_derive::{Deserialize, Serialize};

use crate::color::{Bgr, PLACEHOLDER_TEAM_A, PLACEHOLDER_TEAM_B};

/// Resolved class of a track.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamClass {
    /// Team not decided or not a player (ball, goal keeper, referee)
    Unassigned = 0,
    TeamA = 1,
    TeamB = 2,
}

impl TeamClass {
    #[inline]
    pub fn label(self) -> usize {
        self as usize
    }

    pub fn from_label(label: usize) -> Option<Self> {
        match label {
            0 => Some(TeamClass::Unassigned),
            1 => Some(TeamClass::TeamA),
            2 => Some(TeamClass::TeamB),
            _ => None,
        }
    }
}

/// Per-frame result handed back to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamAssignment {
    #[serde(rename = "teamAColor")]
    pub team_a_color: Bgr,
    #[serde(rename = "teamBColor")]
    pub team_b_color: Bgr,
    /// One class label per input track, in input order
    #[serde(rename = "teamClasses")]
    pub team_classes: Vec<u8>,
}

impl TeamAssignment {
    /// Provisional result reported while evidence is gathered: placeholder colors
    /// and every track in team A.
    pub fn provisional(num_tracks: usize) -> Self {
        Self {
            team_a_color: PLACEHOLDER_TEAM_A,
            team_b_color: PLACEHOLDER_TEAM_B,
            team_classes: vec![TeamClass::TeamA as u8; num_tracks],
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = Option<TeamClass>> + '_ {
        self.team_classes
            .iter()
            .map(|&l| TeamClass::from_label(l as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip() {
        for class in [TeamClass::Unassigned, TeamClass::TeamA, TeamClass::TeamB] {
            assert_eq!(TeamClass::from_label(class.label()), Some(class));
        }
        assert_eq!(TeamClass::from_label(3), None);
    }

    #[test]
    fn provisional_output() {
        let out = TeamAssignment::provisional(4);
        assert_eq!(out.team_a_color, [255, 255, 255]);
        assert_eq!(out.team_b_color, [0, 0, 0]);
        assert_eq!(out.team_classes, vec![1, 1, 1, 1]);
        assert!(out.classes().all(|c| c == Some(TeamClass::TeamA)));
    }

    #[test]
    fn host_field_names() {
        let out = TeamAssignment {
            team_a_color: [1, 2, 3],
            team_b_color: [4, 5, 6],
            team_classes: vec![0, 2],
        };

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["teamAColor"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["teamBColor"], serde_json::json!([4, 5, 6]));
        assert_eq!(json["teamClasses"], serde_json::json!([0, 2]));
    }
}
