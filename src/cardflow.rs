use crate::queue::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Committed(Decision),
    Exiting(Decision),
}

impl CardPhase {
    fn decision(self) -> Decision {
        match self {
            CardPhase::Committed(decision) | CardPhase::Exiting(decision) => decision,
        }
    }
}

// Decided cards stay listed, in commit order, until their exit
// animation reports completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFlow {
    cards: Vec<(String, CardPhase)>,
}

impl CardFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_commit(&mut self, id: &str, decision: Decision) {
        // A card undone mid-flight and decided again keeps one entry.
        if let Some((_, phase)) = self.cards.iter_mut().find(|(card, _)| card == id) {
            *phase = CardPhase::Committed(decision);
            return;
        }
        self.cards.push((id.to_string(), CardPhase::Committed(decision)));
    }

    pub fn begin_exit(&mut self, id: &str) -> Option<Decision> {
        let (_, phase) = self.cards.iter_mut().find(|(card, _)| card == id)?;
        let decision = phase.decision();
        *phase = CardPhase::Exiting(decision);
        Some(decision)
    }

    pub fn direction(&self, id: &str) -> Option<Decision> {
        self.cards
            .iter()
            .find(|(card, _)| card == id)
            .map(|(_, phase)| phase.decision())
    }

    pub fn is_exiting(&self, id: &str) -> bool {
        matches!(
            self.cards.iter().find(|(card, _)| card == id),
            Some((_, CardPhase::Exiting(_)))
        )
    }

    pub fn on_animation_complete(&mut self, id: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|(card, _)| card != id);
        self.cards.len() < before
    }

    pub fn departing(&self) -> impl Iterator<Item = (&str, Decision)> {
        self.cards
            .iter()
            .map(|(id, phase)| (id.as_str(), phase.decision()))
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_records_direction_until_the_animation_finishes() {
        let mut flow = CardFlow::new();
        flow.on_commit("a", Decision::Like);

        assert_eq!(flow.direction("a"), Some(Decision::Like));
        assert!(!flow.is_exiting("a"));

        assert_eq!(flow.begin_exit("a"), Some(Decision::Like));
        assert!(flow.is_exiting("a"));

        assert!(flow.on_animation_complete("a"));
        assert_eq!(flow.direction("a"), None);
        assert!(flow.is_empty());
    }

    #[test]
    fn unknown_ids_fall_through() {
        let mut flow = CardFlow::new();
        assert_eq!(flow.begin_exit("ghost"), None);
        assert!(!flow.on_animation_complete("ghost"));
    }

    #[test]
    fn a_second_decision_for_the_same_card_replaces_the_first() {
        let mut flow = CardFlow::new();
        flow.on_commit("a", Decision::Like);
        flow.begin_exit("a");
        flow.on_commit("a", Decision::Dislike);

        assert_eq!(flow.direction("a"), Some(Decision::Dislike));
        assert!(!flow.is_exiting("a"));
        assert_eq!(flow.departing().count(), 1);
    }

    #[test]
    fn overlapping_departures_keep_commit_order() {
        let mut flow = CardFlow::new();
        flow.on_commit("a", Decision::Like);
        flow.on_commit("b", Decision::Dislike);
        flow.begin_exit("a");

        let departing: Vec<_> = flow.departing().collect();
        assert_eq!(
            departing,
            vec![("a", Decision::Like), ("b", Decision::Dislike)]
        );

        flow.on_animation_complete("a");
        assert_eq!(flow.direction("b"), Some(Decision::Dislike));
        assert_eq!(flow.departing().count(), 1);
    }
}
