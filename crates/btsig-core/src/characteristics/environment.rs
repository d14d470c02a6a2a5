//! Environmental Sensing service characteristics.

use btsig_types::ids;

use crate::scalar::{Scalar, Scale};
use crate::schema::{FieldSchema, FieldSpec};
use crate::unit::{LengthRule, Unit};

static FLUX_2D_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("x_axis", Scalar::I16).with_scale(Scale::decimal(-7)),
    FieldSpec::always("y_axis", Scalar::I16).with_scale(Scale::decimal(-7)),
];
static FLUX_2D_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: FLUX_2D_FIELDS,
};

static FLUX_3D_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("x_axis", Scalar::I16).with_scale(Scale::decimal(-7)),
    FieldSpec::always("y_axis", Scalar::I16).with_scale(Scale::decimal(-7)),
    FieldSpec::always("z_axis", Scalar::I16).with_scale(Scale::decimal(-7)),
];
static FLUX_3D_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: FLUX_3D_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(
        Unit::scaled(
            ids::MAGNETIC_DECLINATION,
            "Magnetic Declination",
            "magnetic_declination",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_range(0.0, 359.99)
        .with_unit("deg"),
    );
    units.push(
        Unit::scaled(ids::ELEVATION, "Elevation", "elevation", Scalar::I24, Scale::decimal(-2))
            .with_unit("m"),
    );
    units.push(
        Unit::scaled(ids::PRESSURE, "Pressure", "pressure", Scalar::U32, Scale::decimal(-1))
            .with_unit("Pa"),
    );
    units.push(
        Unit::scaled(
            ids::TEMPERATURE,
            "Temperature",
            "temperature",
            Scalar::I16,
            Scale::decimal(-2),
        )
        .with_range(-273.15, 327.67)
        .with_unit("degC"),
    );
    units.push(
        Unit::scaled(ids::HUMIDITY, "Humidity", "humidity", Scalar::U16, Scale::decimal(-2))
            .with_range(0.0, 100.0)
            .with_unit("%"),
    );
    units.push(
        Unit::scaled(
            ids::TRUE_WIND_SPEED,
            "True Wind Speed",
            "true_wind_speed",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_unit("m/s"),
    );
    units.push(
        Unit::scaled(
            ids::TRUE_WIND_DIRECTION,
            "True Wind Direction",
            "true_wind_direction",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_range(0.0, 359.99)
        .with_unit("deg"),
    );
    units.push(
        Unit::scaled(
            ids::APPARENT_WIND_SPEED,
            "Apparent Wind Speed",
            "apparent_wind_speed",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_unit("m/s"),
    );
    units.push(
        Unit::scaled(
            ids::APPARENT_WIND_DIRECTION,
            "Apparent Wind Direction",
            "apparent_wind_direction",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_range(0.0, 359.99)
        .with_unit("deg"),
    );
    units.push(Unit::scaled(
        ids::GUST_FACTOR,
        "Gust Factor",
        "gust_factor",
        Scalar::U8,
        Scale::decimal(-1),
    ));
    units.push(
        Unit::scalar(
            ids::POLLEN_CONCENTRATION,
            "Pollen Concentration",
            "pollen_concentration",
            Scalar::U24,
        )
        .with_unit("1/m3"),
    );
    units.push(Unit::scalar(ids::UV_INDEX, "UV Index", "uv_index", Scalar::U8));
    units.push(
        Unit::scaled(
            ids::IRRADIANCE,
            "Irradiance",
            "irradiance",
            Scalar::U16,
            Scale::decimal(-1),
        )
        .with_unit("W/m2"),
    );
    units.push(
        Unit::scaled(ids::RAINFALL, "Rainfall", "rainfall", Scalar::U16, Scale::decimal(-3))
            .with_unit("m"),
    );
    units.push(
        Unit::scalar(ids::WIND_CHILL, "Wind Chill", "wind_chill", Scalar::I8)
            .with_unit("degC"),
    );
    units.push(
        Unit::scalar(ids::HEAT_INDEX, "Heat Index", "heat_index", Scalar::I8)
            .with_unit("degC"),
    );
    units.push(
        Unit::scalar(ids::DEW_POINT, "Dew Point", "dew_point", Scalar::I8)
            .with_unit("degC"),
    );
    units.push(
        Unit::composite(
            ids::MAGNETIC_FLUX_DENSITY_2D,
            "Magnetic Flux Density - 2D",
            "magnetic_flux_density_2d",
            &FLUX_2D_SCHEMA,
        )
        .with_length(LengthRule::Exact(4))
        .with_unit("T"),
    );
    units.push(
        Unit::composite(
            ids::MAGNETIC_FLUX_DENSITY_3D,
            "Magnetic Flux Density - 3D",
            "magnetic_flux_density_3d",
            &FLUX_3D_SCHEMA,
        )
        .with_length(LengthRule::Exact(6))
        .with_unit("T"),
    );
    units.push(
        Unit::scalar(
            ids::BAROMETRIC_PRESSURE_TREND,
            "Barometric Pressure Trend",
            "barometric_pressure_trend",
            Scalar::U8,
        )
        .with_range(0.0, 9.0),
    );
    units.push(
        Unit::scalar(ids::ALTITUDE, "Altitude", "altitude", Scalar::U16).with_unit("m"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DependencyContext;
    use btsig_types::Value;

    fn find(id: btsig_types::SpecId) -> Unit {
        let mut units = Vec::new();
        register(&mut units);
        units
            .into_iter()
            .find(|u| u.descriptor.id == id)
            .expect("unit registered")
    }

    fn as_float(value: Value) -> f64 {
        match value {
            Value::Float(v) => v,
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_temperature_centidegrees() {
        let unit = find(ids::TEMPERATURE);
        let ctx = DependencyContext::new();
        let v = as_float(unit.raw_decode(&[0x64, 0x09], &ctx).unwrap());
        assert!((v - 24.04).abs() < 1e-9);
        // negative readings sign-extend
        let v = as_float(unit.raw_decode(&[0x18, 0xFC], &ctx).unwrap());
        assert!((v + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_decipascals() {
        let unit = find(ids::PRESSURE);
        let ctx = DependencyContext::new();
        let v = as_float(unit.raw_decode(&1_013_250u32.to_le_bytes(), &ctx).unwrap());
        assert!((v - 101_325.0).abs() < 1e-6);
    }

    #[test]
    fn test_elevation_signed_24_bit() {
        let unit = find(ids::ELEVATION);
        let ctx = DependencyContext::new();
        // -25.50 m below sea level
        let v = as_float(unit.raw_decode(&[0x0A, 0xF6, 0xFF], &ctx).unwrap());
        assert!((v + 25.5).abs() < 1e-9);
    }

    #[test]
    fn test_magnetic_flux_3d_axes() {
        let unit = find(ids::MAGNETIC_FLUX_DENSITY_3D);
        let ctx = DependencyContext::new();
        let data = [0x10, 0x00, 0xF0, 0xFF, 0x00, 0x00];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        match value.field("x_axis") {
            Some(Value::Float(v)) => assert!((v - 16e-7).abs() < 1e-12),
            other => panic!("expected float x_axis, got {other:?}"),
        }
        match value.field("y_axis") {
            Some(Value::Float(v)) => assert!((v + 16e-7).abs() < 1e-12),
            other => panic!("expected float y_axis, got {other:?}"),
        }
    }

    #[test]
    fn test_humidity_range_declared() {
        let unit = find(ids::HUMIDITY);
        let range = unit.descriptor.range.unwrap();
        assert!(range.contains(55.5));
        assert!(!range.contains(101.0));
    }
}
