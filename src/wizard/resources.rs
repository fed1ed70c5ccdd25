use super::request::{Request, BYTES_PER_MEGABYTE};
use super::Hydration;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceLimits {
    pub ops_per_second: Option<u64>,
    pub timeout: Option<u64>,
    pub max_rows: Option<u64>,
    pub max_mbytes: Option<u64>,
}

impl ResourceLimits {
    pub fn get(&self, field: ResourceField) -> Option<u64> {
        match field {
            ResourceField::OpsPerSecond => self.ops_per_second,
            ResourceField::Timeout => self.timeout,
            ResourceField::MaxRows => self.max_rows,
            ResourceField::MaxMbytes => self.max_mbytes,
        }
    }

    fn set(&mut self, field: ResourceField, value: Option<u64>) {
        match field {
            ResourceField::OpsPerSecond => self.ops_per_second = value,
            ResourceField::Timeout => self.timeout = value,
            ResourceField::MaxRows => self.max_rows = value,
            ResourceField::MaxMbytes => self.max_mbytes = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceField {
    OpsPerSecond,
    Timeout,
    MaxRows,
    MaxMbytes,
}

pub const ALL_RESOURCE_FIELDS: [ResourceField; 4] = [
    ResourceField::OpsPerSecond,
    ResourceField::Timeout,
    ResourceField::MaxRows,
    ResourceField::MaxMbytes,
];

impl ResourceField {
    fn index(self) -> usize {
        match self {
            ResourceField::OpsPerSecond => 0,
            ResourceField::Timeout => 1,
            ResourceField::MaxRows => 2,
            ResourceField::MaxMbytes => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceField::OpsPerSecond => "Ops/Sec",
            ResourceField::Timeout => "Max Execution Time in Seconds",
            ResourceField::MaxRows => "Max Rows",
            ResourceField::MaxMbytes => "Max Mb Uploaded",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ResourceField::Timeout => "600",
            _ => "Unlimited",
        }
    }
}

/// Local state of the resource limits step. Values are committed to the
/// wizard as one snapshot when the step is left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcesForm {
    values: ResourceLimits,
    inputs: [String; 4],
    invalid: [bool; 4],
    hydration: Hydration,
}

impl ResourcesForm {
    pub fn value(&self, field: ResourceField) -> Option<u64> {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: ResourceField, value: Option<u64>) {
        self.values.set(field, value);
    }

    pub fn is_invalid(&self, field: ResourceField) -> bool {
        self.invalid[field.index()]
    }

    pub fn set_invalid(&mut self, field: ResourceField, invalid: bool) {
        self.invalid[field.index()] = invalid;
    }

    pub fn input_text(&self, field: ResourceField) -> &str {
        &self.inputs[field.index()]
    }

    /// Integer input contract: blank clears the value, an unsigned integer
    /// sets it, anything else flags the field invalid and keeps the last
    /// good value.
    pub fn set_field_text(&mut self, field: ResourceField, raw: &str) {
        let trimmed = raw.trim();
        self.inputs[field.index()] = trimmed.to_string();
        if trimmed.is_empty() {
            self.set_value(field, None);
            self.set_invalid(field, false);
            return;
        }
        match trimmed.parse::<u64>() {
            Ok(value) => {
                self.set_value(field, Some(value));
                self.set_invalid(field, false);
            }
            Err(_) => self.set_invalid(field, true),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.invalid.iter().any(|invalid| *invalid)
    }

    pub fn snapshot(&self) -> ResourceLimits {
        self.values
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// Copies limits from the base request the first time one is
    /// available. Returns true only on the call that hydrated the form.
    pub fn hydrate_from(&mut self, request: Option<&Request>) -> bool {
        if self.hydration == Hydration::Hydrated {
            return false;
        }
        let Some(request) = request else {
            return false;
        };
        self.values = ResourceLimits {
            ops_per_second: request.ops_per_second,
            timeout: request.timeout,
            max_rows: request.max_rows,
            max_mbytes: Some(request.max_upload_bytes.unwrap_or(0) / BYTES_PER_MEGABYTE),
        };
        for field in ALL_RESOURCE_FIELDS {
            self.inputs[field.index()] = self
                .values
                .get(field)
                .map(|value| value.to_string())
                .unwrap_or_default();
        }
        self.hydration = Hydration::Hydrated;
        true
    }
}
