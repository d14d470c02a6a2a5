//! Well-known Bluetooth SIG characteristic identifiers.
//!
//! These are the 16-bit assigned numbers from the Bluetooth SIG registry,
//! expanded over the base UUID by [`SpecId::from_u16`]. The codec engine's
//! built-in table binds each of these to a decode/encode unit.

use crate::id::SpecId;

// --- Generic Access / Generic Attribute ---

/// Device Name characteristic.
pub const DEVICE_NAME: SpecId = SpecId::from_u16(0x2A00);

/// Appearance characteristic.
pub const APPEARANCE: SpecId = SpecId::from_u16(0x2A01);

/// Peripheral Privacy Flag characteristic.
pub const PERIPHERAL_PRIVACY_FLAG: SpecId = SpecId::from_u16(0x2A02);

/// Reconnection Address characteristic.
pub const RECONNECTION_ADDRESS: SpecId = SpecId::from_u16(0x2A03);

/// Peripheral Preferred Connection Parameters characteristic.
pub const PERIPHERAL_PREFERRED_CONNECTION_PARAMETERS: SpecId = SpecId::from_u16(0x2A04);

/// Service Changed characteristic.
pub const SERVICE_CHANGED: SpecId = SpecId::from_u16(0x2A05);

/// Alert Level characteristic (Immediate Alert / Link Loss).
pub const ALERT_LEVEL: SpecId = SpecId::from_u16(0x2A06);

/// Tx Power Level characteristic.
pub const TX_POWER_LEVEL: SpecId = SpecId::from_u16(0x2A07);

/// Battery Level characteristic.
pub const BATTERY_LEVEL: SpecId = SpecId::from_u16(0x2A19);

// --- Device Information ---

/// System ID characteristic.
pub const SYSTEM_ID: SpecId = SpecId::from_u16(0x2A23);

/// Model Number String characteristic.
pub const MODEL_NUMBER: SpecId = SpecId::from_u16(0x2A24);

/// Serial Number String characteristic.
pub const SERIAL_NUMBER: SpecId = SpecId::from_u16(0x2A25);

/// Firmware Revision String characteristic.
pub const FIRMWARE_REVISION: SpecId = SpecId::from_u16(0x2A26);

/// Hardware Revision String characteristic.
pub const HARDWARE_REVISION: SpecId = SpecId::from_u16(0x2A27);

/// Software Revision String characteristic.
pub const SOFTWARE_REVISION: SpecId = SpecId::from_u16(0x2A28);

/// Manufacturer Name String characteristic.
pub const MANUFACTURER_NAME: SpecId = SpecId::from_u16(0x2A29);

/// PnP ID characteristic.
pub const PNP_ID: SpecId = SpecId::from_u16(0x2A50);

// --- Time ---

/// Date Time characteristic.
pub const DATE_TIME: SpecId = SpecId::from_u16(0x2A08);

/// Day of Week characteristic.
pub const DAY_OF_WEEK: SpecId = SpecId::from_u16(0x2A09);

/// Local Time Information characteristic.
pub const LOCAL_TIME_INFORMATION: SpecId = SpecId::from_u16(0x2A0F);

/// Reference Time Information characteristic.
pub const REFERENCE_TIME_INFORMATION: SpecId = SpecId::from_u16(0x2A14);

/// Current Time characteristic.
pub const CURRENT_TIME: SpecId = SpecId::from_u16(0x2A2B);

// --- Health Thermometer ---

/// Temperature Measurement characteristic.
pub const TEMPERATURE_MEASUREMENT: SpecId = SpecId::from_u16(0x2A1C);

/// Temperature Type characteristic.
pub const TEMPERATURE_TYPE: SpecId = SpecId::from_u16(0x2A1D);

/// Intermediate Temperature characteristic.
pub const INTERMEDIATE_TEMPERATURE: SpecId = SpecId::from_u16(0x2A1E);

/// Measurement Interval characteristic.
pub const MEASUREMENT_INTERVAL: SpecId = SpecId::from_u16(0x2A21);

// --- Heart Rate ---

/// Heart Rate Measurement characteristic.
pub const HEART_RATE_MEASUREMENT: SpecId = SpecId::from_u16(0x2A37);

/// Body Sensor Location characteristic.
pub const BODY_SENSOR_LOCATION: SpecId = SpecId::from_u16(0x2A38);

/// Heart Rate Control Point characteristic.
pub const HEART_RATE_CONTROL_POINT: SpecId = SpecId::from_u16(0x2A39);

// --- Blood Pressure ---

/// Blood Pressure Measurement characteristic.
pub const BLOOD_PRESSURE_MEASUREMENT: SpecId = SpecId::from_u16(0x2A35);

/// Intermediate Cuff Pressure characteristic.
pub const INTERMEDIATE_CUFF_PRESSURE: SpecId = SpecId::from_u16(0x2A36);

/// Blood Pressure Feature characteristic.
pub const BLOOD_PRESSURE_FEATURE: SpecId = SpecId::from_u16(0x2A49);

// --- Glucose ---

/// Glucose Measurement characteristic.
pub const GLUCOSE_MEASUREMENT: SpecId = SpecId::from_u16(0x2A18);

/// Glucose Measurement Context characteristic.
pub const GLUCOSE_MEASUREMENT_CONTEXT: SpecId = SpecId::from_u16(0x2A34);

/// Glucose Feature characteristic.
pub const GLUCOSE_FEATURE: SpecId = SpecId::from_u16(0x2A51);

// --- Pulse Oximeter ---

/// PLX Spot-Check Measurement characteristic.
pub const PLX_SPOT_CHECK_MEASUREMENT: SpecId = SpecId::from_u16(0x2A5E);

/// PLX Continuous Measurement characteristic.
pub const PLX_CONTINUOUS_MEASUREMENT: SpecId = SpecId::from_u16(0x2A5F);

/// PLX Features characteristic.
pub const PLX_FEATURES: SpecId = SpecId::from_u16(0x2A60);

// --- Running / Cycling ---

/// RSC Measurement characteristic.
pub const RSC_MEASUREMENT: SpecId = SpecId::from_u16(0x2A53);

/// RSC Feature characteristic.
pub const RSC_FEATURE: SpecId = SpecId::from_u16(0x2A54);

/// CSC Measurement characteristic.
pub const CSC_MEASUREMENT: SpecId = SpecId::from_u16(0x2A5B);

/// CSC Feature characteristic.
pub const CSC_FEATURE: SpecId = SpecId::from_u16(0x2A5C);

/// Cycling Power Measurement characteristic.
pub const CYCLING_POWER_MEASUREMENT: SpecId = SpecId::from_u16(0x2A63);

/// Cycling Power Feature characteristic.
pub const CYCLING_POWER_FEATURE: SpecId = SpecId::from_u16(0x2A65);

/// Location and Speed characteristic.
pub const LOCATION_AND_SPEED: SpecId = SpecId::from_u16(0x2A67);

/// LN Feature characteristic.
pub const LN_FEATURE: SpecId = SpecId::from_u16(0x2A6A);

// --- Weight Scale / Body Composition ---

/// Body Composition Feature characteristic.
pub const BODY_COMPOSITION_FEATURE: SpecId = SpecId::from_u16(0x2A9B);

/// Body Composition Measurement characteristic.
pub const BODY_COMPOSITION_MEASUREMENT: SpecId = SpecId::from_u16(0x2A9C);

/// Weight Measurement characteristic.
pub const WEIGHT_MEASUREMENT: SpecId = SpecId::from_u16(0x2A9D);

/// Weight Scale Feature characteristic.
pub const WEIGHT_SCALE_FEATURE: SpecId = SpecId::from_u16(0x2A9E);

// --- User Data ---

/// Aerobic Heart Rate Lower Limit characteristic.
pub const AEROBIC_HEART_RATE_LOWER_LIMIT: SpecId = SpecId::from_u16(0x2A7E);

/// Aerobic Threshold characteristic.
pub const AEROBIC_THRESHOLD: SpecId = SpecId::from_u16(0x2A7F);

/// Age characteristic.
pub const AGE: SpecId = SpecId::from_u16(0x2A80);

/// Anaerobic Heart Rate Lower Limit characteristic.
pub const ANAEROBIC_HEART_RATE_LOWER_LIMIT: SpecId = SpecId::from_u16(0x2A81);

/// Anaerobic Heart Rate Upper Limit characteristic.
pub const ANAEROBIC_HEART_RATE_UPPER_LIMIT: SpecId = SpecId::from_u16(0x2A82);

/// Anaerobic Threshold characteristic.
pub const ANAEROBIC_THRESHOLD: SpecId = SpecId::from_u16(0x2A83);

/// Aerobic Heart Rate Upper Limit characteristic.
pub const AEROBIC_HEART_RATE_UPPER_LIMIT: SpecId = SpecId::from_u16(0x2A84);

/// Date of Birth characteristic.
pub const DATE_OF_BIRTH: SpecId = SpecId::from_u16(0x2A85);

/// Date of Threshold Assessment characteristic.
pub const DATE_OF_THRESHOLD_ASSESSMENT: SpecId = SpecId::from_u16(0x2A86);

/// Email Address characteristic.
pub const EMAIL_ADDRESS: SpecId = SpecId::from_u16(0x2A87);

/// First Name characteristic.
pub const FIRST_NAME: SpecId = SpecId::from_u16(0x2A8A);

/// Gender characteristic.
pub const GENDER: SpecId = SpecId::from_u16(0x2A8C);

/// Heart Rate Max characteristic.
pub const HEART_RATE_MAX: SpecId = SpecId::from_u16(0x2A8D);

/// Height characteristic.
pub const HEIGHT: SpecId = SpecId::from_u16(0x2A8E);

/// Hip Circumference characteristic.
pub const HIP_CIRCUMFERENCE: SpecId = SpecId::from_u16(0x2A8F);

/// Last Name characteristic.
pub const LAST_NAME: SpecId = SpecId::from_u16(0x2A90);

/// Maximum Recommended Heart Rate characteristic.
pub const MAXIMUM_RECOMMENDED_HEART_RATE: SpecId = SpecId::from_u16(0x2A91);

/// Resting Heart Rate characteristic.
pub const RESTING_HEART_RATE: SpecId = SpecId::from_u16(0x2A92);

/// Sport Type for Aerobic and Anaerobic Thresholds characteristic.
pub const SPORT_TYPE: SpecId = SpecId::from_u16(0x2A93);

/// VO2 Max characteristic.
pub const VO2_MAX: SpecId = SpecId::from_u16(0x2A96);

/// Waist Circumference characteristic.
pub const WAIST_CIRCUMFERENCE: SpecId = SpecId::from_u16(0x2A97);

/// Weight characteristic.
pub const WEIGHT: SpecId = SpecId::from_u16(0x2A98);

/// Database Change Increment characteristic.
pub const DATABASE_CHANGE_INCREMENT: SpecId = SpecId::from_u16(0x2A99);

/// User Index characteristic.
pub const USER_INDEX: SpecId = SpecId::from_u16(0x2A9A);

/// Language characteristic.
pub const LANGUAGE: SpecId = SpecId::from_u16(0x2AA2);

// --- Environmental Sensing ---

/// Magnetic Declination characteristic.
pub const MAGNETIC_DECLINATION: SpecId = SpecId::from_u16(0x2A2C);

/// Elevation characteristic.
pub const ELEVATION: SpecId = SpecId::from_u16(0x2A6C);

/// Pressure characteristic.
pub const PRESSURE: SpecId = SpecId::from_u16(0x2A6D);

/// Temperature characteristic.
pub const TEMPERATURE: SpecId = SpecId::from_u16(0x2A6E);

/// Humidity characteristic.
pub const HUMIDITY: SpecId = SpecId::from_u16(0x2A6F);

/// True Wind Speed characteristic.
pub const TRUE_WIND_SPEED: SpecId = SpecId::from_u16(0x2A70);

/// True Wind Direction characteristic.
pub const TRUE_WIND_DIRECTION: SpecId = SpecId::from_u16(0x2A71);

/// Apparent Wind Speed characteristic.
pub const APPARENT_WIND_SPEED: SpecId = SpecId::from_u16(0x2A72);

/// Apparent Wind Direction characteristic.
pub const APPARENT_WIND_DIRECTION: SpecId = SpecId::from_u16(0x2A73);

/// Gust Factor characteristic.
pub const GUST_FACTOR: SpecId = SpecId::from_u16(0x2A74);

/// Pollen Concentration characteristic.
pub const POLLEN_CONCENTRATION: SpecId = SpecId::from_u16(0x2A75);

/// UV Index characteristic.
pub const UV_INDEX: SpecId = SpecId::from_u16(0x2A76);

/// Irradiance characteristic.
pub const IRRADIANCE: SpecId = SpecId::from_u16(0x2A77);

/// Rainfall characteristic.
pub const RAINFALL: SpecId = SpecId::from_u16(0x2A78);

/// Wind Chill characteristic.
pub const WIND_CHILL: SpecId = SpecId::from_u16(0x2A79);

/// Heat Index characteristic.
pub const HEAT_INDEX: SpecId = SpecId::from_u16(0x2A7A);

/// Dew Point characteristic.
pub const DEW_POINT: SpecId = SpecId::from_u16(0x2A7B);

/// Magnetic Flux Density - 2D characteristic.
pub const MAGNETIC_FLUX_DENSITY_2D: SpecId = SpecId::from_u16(0x2AA0);

/// Magnetic Flux Density - 3D characteristic.
pub const MAGNETIC_FLUX_DENSITY_3D: SpecId = SpecId::from_u16(0x2AA1);

/// Barometric Pressure Trend characteristic.
pub const BAROMETRIC_PRESSURE_TREND: SpecId = SpecId::from_u16(0x2AA3);

/// Altitude characteristic.
pub const ALTITUDE: SpecId = SpecId::from_u16(0x2AB3);

// --- Automation IO ---

/// Digital characteristic.
pub const DIGITAL: SpecId = SpecId::from_u16(0x2A56);

/// Analog characteristic.
pub const ANALOG: SpecId = SpecId::from_u16(0x2A58);

/// Aggregate characteristic.
pub const AGGREGATE: SpecId = SpecId::from_u16(0x2A5A);
