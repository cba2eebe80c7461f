use crate::config::{
    FIELD_BOUND, FIELD_STEP, TEMPERATURE_CEILING, TEMPERATURE_FLOOR, TEMPERATURE_STEP,
};

/// Temperature and field read by one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub temperature: f64,
    pub field: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub temperature_step: f64,
    pub temperature_floor: f64,
    pub temperature_ceiling: Option<f64>,
    pub field_step: f64,
    /// Field is kept within `[-bound, bound]` when set.
    pub field_bound: Option<f64>,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            temperature_step: TEMPERATURE_STEP,
            temperature_floor: TEMPERATURE_FLOOR,
            temperature_ceiling: Some(TEMPERATURE_CEILING),
            field_step: FIELD_STEP,
            field_bound: Some(FIELD_BOUND),
        }
    }
}

impl ControlLimits {
    /// Falls back to the defaults for steps and floor that are not finite
    /// and positive, and drops clamps that are not finite or not above the
    /// floor, so the temperature always stays strictly positive.
    pub fn sanitized(self) -> Self {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let defaults = ControlLimits::default();

        let temperature_floor = Some(self.temperature_floor)
            .filter(|&t| positive(t))
            .unwrap_or(defaults.temperature_floor);

        Self {
            temperature_step: Some(self.temperature_step)
                .filter(|&s| positive(s))
                .unwrap_or(defaults.temperature_step),
            temperature_floor,
            temperature_ceiling: self
                .temperature_ceiling
                .filter(|&t| t.is_finite() && t > temperature_floor),
            field_step: Some(self.field_step)
                .filter(|&s| positive(s))
                .unwrap_or(defaults.field_step),
            field_bound: self.field_bound.filter(|&h| positive(h)),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ControlKey {
    RaiseTemperature,
    LowerTemperature,
    RaiseField,
    LowerField,
    ResetField,
}

/// Triggers held during the current frame.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Controls {
    pub raise_temperature: bool,
    pub lower_temperature: bool,
    pub raise_field: bool,
    pub lower_field: bool,
    pub reset_field: bool,
}

impl Controls {
    pub fn set(&mut self, key: ControlKey, active: bool) {
        let slot = match key {
            ControlKey::RaiseTemperature => &mut self.raise_temperature,
            ControlKey::LowerTemperature => &mut self.lower_temperature,
            ControlKey::RaiseField => &mut self.raise_field,
            ControlKey::LowerField => &mut self.lower_field,
            ControlKey::ResetField => &mut self.reset_field,
        };
        *slot = active;
    }

    pub fn is_idle(&self) -> bool {
        *self == Controls::default()
    }
}

/// Sole owner of the simulation temperature and field.
#[derive(Debug, Clone)]
pub struct Controller {
    parameters: Parameters,
    limits: ControlLimits,
}

impl Controller {
    pub fn new(parameters: Parameters, limits: ControlLimits) -> Self {
        let mut controller = Self {
            parameters: Parameters {
                temperature: limits.temperature_floor,
                field: 0.0,
            },
            limits: limits.sanitized(),
        };
        controller.set_temperature(parameters.temperature);
        controller.set_field(parameters.field);
        controller
    }

    #[inline(always)]
    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    #[inline(always)]
    pub fn temperature(&self) -> f64 {
        self.parameters.temperature
    }

    #[inline(always)]
    pub fn field(&self) -> f64 {
        self.parameters.field
    }

    #[inline(always)]
    pub fn limits(&self) -> &ControlLimits {
        &self.limits
    }

    pub fn increase_temperature(&mut self, step: f64) {
        self.set_temperature(self.parameters.temperature + step);
    }

    pub fn decrease_temperature(&mut self, step: f64) {
        self.set_temperature(self.parameters.temperature - step);
    }

    pub fn increase_field(&mut self, step: f64) {
        self.set_field(self.parameters.field + step);
    }

    pub fn decrease_field(&mut self, step: f64) {
        self.set_field(self.parameters.field - step);
    }

    pub fn reset_field(&mut self) {
        self.parameters.field = 0.0;
    }

    /// Applies one frame of held triggers with the configured steps.
    pub fn apply(&mut self, controls: &Controls) {
        let ControlLimits {
            temperature_step,
            field_step,
            ..
        } = self.limits;

        if controls.raise_temperature {
            self.increase_temperature(temperature_step);
        }
        if controls.lower_temperature {
            self.decrease_temperature(temperature_step);
        }
        if controls.raise_field {
            self.increase_field(field_step);
        }
        if controls.lower_field {
            self.decrease_field(field_step);
        }
        if controls.reset_field {
            self.reset_field();
        }
    }

    fn set_temperature(&mut self, temperature: f64) {
        let mut temperature = temperature.max(self.limits.temperature_floor);
        if let Some(ceiling) = self.limits.temperature_ceiling {
            temperature = temperature.min(ceiling);
        }
        self.parameters.temperature = temperature;
    }

    fn set_field(&mut self, field: f64) {
        if field.is_nan() {
            return;
        }
        self.parameters.field = match self.limits.field_bound {
            Some(bound) => field.clamp(-bound, bound),
            None => field,
        };
    }
}
