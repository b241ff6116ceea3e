/// Snapshot of the four driving keys for one frame.
///
/// The host's input capture produces one of these per frame (keyboard state
/// is sampled, not evented, so opposing keys can both be down). Both axes
/// cancel to neutral when their two keys are held together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputIntent {
    /// No keys held.
    pub const NEUTRAL: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    /// Steering axis: +1 = left, -1 = right, 0 = neutral.
    #[inline]
    pub fn steer(self) -> f32 {
        (self.left as i8 - self.right as i8) as f32
    }

    /// Drive axis: +1 = forward, -1 = backward, 0 = neutral.
    #[inline]
    pub fn throttle(self) -> f32 {
        (self.forward as i8 - self.backward as i8) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_have_documented_signs() {
        let left = InputIntent {
            left: true,
            ..InputIntent::NEUTRAL
        };
        let right = InputIntent {
            right: true,
            ..InputIntent::NEUTRAL
        };
        let fwd = InputIntent {
            forward: true,
            ..InputIntent::NEUTRAL
        };
        let back = InputIntent {
            backward: true,
            ..InputIntent::NEUTRAL
        };

        assert_eq!(left.steer(), 1.0);
        assert_eq!(right.steer(), -1.0);
        assert_eq!(fwd.throttle(), 1.0);
        assert_eq!(back.throttle(), -1.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let both_steer = InputIntent {
            left: true,
            right: true,
            ..InputIntent::NEUTRAL
        };
        let both_drive = InputIntent {
            forward: true,
            backward: true,
            ..InputIntent::NEUTRAL
        };

        assert_eq!(both_steer.steer(), 0.0);
        assert_eq!(both_drive.throttle(), 0.0);
        assert_eq!(InputIntent::NEUTRAL.steer(), 0.0);
        assert_eq!(InputIntent::NEUTRAL.throttle(), 0.0);
    }
}
