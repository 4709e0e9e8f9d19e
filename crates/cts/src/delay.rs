use crate::tree::TreeNode;

/// Result of placing the tapping point between two sibling subtrees.
///
/// `extend_left` is the distance from the left child's merging segment
/// to the tap, already clamped to `[0, distance]`; the wire fields are
/// the unclamped per-branch lengths, so a clamped branch can end up
/// longer than the segment distance and the opposite child is flagged
/// for elongation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tapping {
    pub extend_left: i32,
    pub delay_at_tap: f64,
    pub wire_left: i32,
    pub wire_right: i32,
    pub elongate_left: bool,
    pub elongate_right: bool,
}

/// Delay estimation used by the merging pass.
pub trait DelayModel {
    /// Delay of a wire of the given length driving the given load.
    fn wire_delay(&self, length: i32, load_capacitance: f64) -> f64;

    /// Delay per unit of wire length at the given load.
    fn delay_per_unit(&self, load_capacitance: f64) -> f64;

    /// Capacitance contributed by a wire of the given length.
    fn wire_capacitance(&self, length: i32) -> f64;

    /// The zero-skew tapping point between two sibling subtrees whose
    /// merging segments are `distance` apart.
    fn tapping_point(&self, left: &TreeNode, right: &TreeNode, distance: i32) -> Tapping;

    /// Model name, for reports.
    fn name(&self) -> &'static str;
}

/// Clamp a raw tapping extension into `[0, distance]`, flagging the
/// child whose wire must be elongated when the zero-skew point falls
/// outside the segment. Shared by both models.
fn clamp_tapping(
    extend_left: i32,
    delay_left: f64,
    left_delay: f64,
    right_delay: f64,
    distance: i32,
) -> Tapping {
    let mut tapping = Tapping {
        extend_left,
        delay_at_tap: delay_left,
        wire_left: extend_left,
        wire_right: distance - extend_left,
        elongate_left: false,
        elongate_right: false,
    };
    if extend_left < 0 {
        // The balance point lies beyond the right segment: the right
        // branch absorbs the whole detour.
        dme_log!("tapping clamped low: extend_left = {}", extend_left);
        tapping.wire_left = 0;
        tapping.wire_right = distance - extend_left;
        tapping.extend_left = 0;
        tapping.delay_at_tap = left_delay;
        tapping.elongate_right = true;
    } else if extend_left > distance {
        dme_log!("tapping clamped high: extend_left = {}", extend_left);
        tapping.wire_right = 0;
        tapping.wire_left = extend_left;
        tapping.extend_left = distance;
        tapping.delay_at_tap = right_delay;
        tapping.elongate_left = true;
    }
    tapping
}

/// Delay proportional to wire length: `delay = k · ℓ`,
/// `capacitance = c · ℓ`. Simple and load-independent.
#[derive(Copy, Clone, Debug)]
pub struct LinearDelay {
    delay_per_unit: f64,
    capacitance_per_unit: f64,
}

impl LinearDelay {
    pub fn new(delay_per_unit: f64, capacitance_per_unit: f64) -> Self {
        LinearDelay { delay_per_unit, capacitance_per_unit }
    }
}

impl Default for LinearDelay {
    fn default() -> Self {
        LinearDelay::new(1.0, 1.0)
    }
}

impl DelayModel for LinearDelay {
    fn wire_delay(&self, length: i32, _load_capacitance: f64) -> f64 {
        self.delay_per_unit * f64::from(length)
    }

    fn delay_per_unit(&self, _load_capacitance: f64) -> f64 {
        self.delay_per_unit
    }

    fn wire_capacitance(&self, length: i32) -> f64 {
        self.capacitance_per_unit * f64::from(length)
    }

    fn tapping_point(&self, left: &TreeNode, right: &TreeNode, distance: i32) -> Tapping {
        let skew = right.delay - left.delay;
        let extend_left =
            ((skew / self.delay_per_unit + f64::from(distance)) / 2.0).round() as i32;
        let delay_left = left.delay + f64::from(extend_left) * self.delay_per_unit;
        clamp_tapping(extend_left, delay_left, left.delay, right.delay, distance)
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

/// Elmore RC delay: `delay = R·ℓ · (C·ℓ/2 + C_load)` with per-unit
/// resistance `R` and capacitance `C`.
#[derive(Copy, Clone, Debug)]
pub struct ElmoreDelay {
    unit_resistance: f64,
    unit_capacitance: f64,
}

impl ElmoreDelay {
    pub fn new(unit_resistance: f64, unit_capacitance: f64) -> Self {
        ElmoreDelay { unit_resistance, unit_capacitance }
    }
}

impl Default for ElmoreDelay {
    fn default() -> Self {
        ElmoreDelay::new(1.0, 1.0)
    }
}

impl DelayModel for ElmoreDelay {
    fn wire_delay(&self, length: i32, load_capacitance: f64) -> f64 {
        let wire_resistance = self.unit_resistance * f64::from(length);
        let wire_capacitance = self.unit_capacitance * f64::from(length);
        wire_resistance * (wire_capacitance / 2.0 + load_capacitance)
    }

    fn delay_per_unit(&self, load_capacitance: f64) -> f64 {
        self.unit_resistance * (self.unit_capacitance / 2.0 + load_capacitance)
    }

    fn wire_capacitance(&self, length: i32) -> f64 {
        self.unit_capacitance * f64::from(length)
    }

    fn tapping_point(&self, left: &TreeNode, right: &TreeNode, distance: i32) -> Tapping {
        let skew = right.delay - left.delay;
        let r = f64::from(distance) * self.unit_resistance;
        let c = f64::from(distance) * self.unit_capacitance;

        // Linearized zero-skew balance for the tap fraction z. Kept in
        // this reduced form deliberately; see DESIGN.md.
        let z = (skew + r * (right.capacitance + c / 2.0))
            / (r * (c + right.capacitance + left.capacitance));

        let extend_left = (z * f64::from(distance)).round() as i32;
        let r_left = f64::from(extend_left) * self.unit_resistance;
        let c_left = f64::from(extend_left) * self.unit_capacitance;
        let delay_left = left.delay + r_left * (c_left / 2.0 + left.capacitance);
        clamp_tapping(extend_left, delay_left, left.delay, right.delay, distance)
    }

    fn name(&self) -> &'static str {
        "elmore"
    }
}
