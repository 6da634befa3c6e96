// ── Modal state ──
//
// Two states, three transitions. A click outside the content area closes
// an open modal; no nested or stacked modals exist anywhere in the app.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl ModalState {
    pub fn open(&mut self) {
        *self = Self::Open;
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// A click landing outside the modal's content area.
    pub fn click_outside(&mut self) {
        if self.is_open() {
            self.close();
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_close_round_trip() {
        let mut modal = ModalState::default();
        assert!(!modal.is_open());
        modal.open();
        assert!(modal.is_open());
        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn click_outside_only_closes_open_modals() {
        let mut modal = ModalState::Closed;
        modal.click_outside();
        assert_eq!(modal, ModalState::Closed);

        modal.open();
        modal.click_outside();
        assert_eq!(modal, ModalState::Closed);
    }
}
