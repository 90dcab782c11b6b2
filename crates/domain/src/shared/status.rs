use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("Unknown status: `{0}`")]
pub struct InvalidStatusError(pub String);

#[derive(Error, Debug, PartialEq)]
#[error("Status can not go from `{from}` to `{to}`")]
pub struct InvalidTransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// Linear status progression shared by every scheduled entity.
///
/// A status may only move to its immediate successor. The last status
/// has no successor.
pub trait LifecycleStatus: Copy + PartialEq + Sized {
    fn next(self) -> Option<Self>;

    fn as_str(self) -> &'static str;

    fn can_transition_to(self, to: Self) -> bool {
        self.next() == Some(to)
    }

    fn check_transition(self, to: Self) -> Result<(), InvalidTransitionError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(InvalidTransitionError {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }
}
