use nurseflow_core::{classify, VitalSign};

fn points(vital: VitalSign, value: f64) -> u8 {
    classify(vital, value).points
}

fn label(vital: VitalSign, value: f64) -> Option<String> {
    classify(vital, value).label
}

#[test]
fn respiration_rate_bands() {
    let rr = VitalSign::RespirationRate;
    assert_eq!(points(rr, 8.0), 3);
    assert_eq!(points(rr, 9.0), 1);
    assert_eq!(points(rr, 11.0), 1);
    assert_eq!(points(rr, 12.0), 0);
    assert_eq!(points(rr, 20.0), 0);
    assert_eq!(points(rr, 21.0), 2);
    assert_eq!(points(rr, 24.0), 2);
    assert_eq!(points(rr, 25.0), 3);
    assert_eq!(label(rr, 25.0).as_deref(), Some("RR Critical (<=8 or >=25)"));
    assert_eq!(label(rr, 20.0), None);
}

#[test]
fn oxygen_saturation_bands() {
    let spo2 = VitalSign::OxygenSaturation;
    assert_eq!(points(spo2, 91.0), 3);
    assert_eq!(points(spo2, 92.0), 2);
    assert_eq!(points(spo2, 93.0), 2);
    assert_eq!(points(spo2, 94.0), 1);
    assert_eq!(points(spo2, 95.0), 1);
    assert_eq!(points(spo2, 96.0), 0);
    assert_eq!(points(spo2, 100.0), 0);
}

#[test]
fn systolic_pressure_checks_low_critical_before_low() {
    let sbp = VitalSign::SystolicPressure;
    assert_eq!(points(sbp, 90.0), 3);
    assert_eq!(label(sbp, 90.0).as_deref(), Some("BP Low (<=90)"));
    assert_eq!(points(sbp, 91.0), 2);
    assert_eq!(label(sbp, 91.0).as_deref(), Some("BP Low (91-100)"));
    assert_eq!(points(sbp, 100.0), 2);
    assert_eq!(points(sbp, 101.0), 1);
    assert_eq!(points(sbp, 110.0), 1);
    assert_eq!(points(sbp, 111.0), 0);
    assert_eq!(points(sbp, 219.0), 0);
    assert_eq!(points(sbp, 220.0), 3);
    assert_eq!(label(sbp, 240.0).as_deref(), Some("BP Critical High (>=220)"));
}

#[test]
fn heart_rate_bands() {
    let hr = VitalSign::HeartRate;
    assert_eq!(points(hr, 40.0), 3);
    assert_eq!(points(hr, 41.0), 1);
    assert_eq!(points(hr, 50.0), 1);
    assert_eq!(points(hr, 51.0), 0);
    assert_eq!(points(hr, 90.0), 0);
    assert_eq!(points(hr, 91.0), 1);
    assert_eq!(points(hr, 110.0), 1);
    assert_eq!(points(hr, 111.0), 2);
    assert_eq!(points(hr, 130.0), 2);
    assert_eq!(points(hr, 131.0), 3);
}

#[test]
fn temperature_bands() {
    let temp = VitalSign::Temperature;
    assert_eq!(points(temp, 35.0), 3);
    assert_eq!(points(temp, 35.1), 1);
    assert_eq!(points(temp, 36.0), 1);
    assert_eq!(points(temp, 36.1), 0);
    assert_eq!(points(temp, 38.0), 0);
    assert_eq!(points(temp, 38.1), 1);
    assert_eq!(points(temp, 39.0), 1);
    assert_eq!(label(temp, 39.0).as_deref(), Some("Temp Abnormal (35.1-36.0 or 38.1-39.0)"));
    assert_eq!(points(temp, 39.1), 2);
    assert_eq!(label(temp, 39.1).as_deref(), Some("Temp High (>=39.1)"));
}

#[test]
fn zero_and_negative_values_are_never_banded() {
    for vital in VitalSign::ALL {
        for value in [0.0, -1.0, f64::NAN] {
            let band = classify(vital, value);
            assert_eq!(band.points, 0, "{vital} {value}");
            assert_eq!(band.label, None);
            assert!(!band.is_provided());
        }
    }
}

#[test]
fn every_rule_has_a_label_and_bounded_points() {
    for vital in VitalSign::ALL {
        assert!(!vital.bands().is_empty());
        for rule in vital.bands() {
            assert!((1..=3).contains(&rule.points), "{}", rule.label);
            assert!(!rule.any_of.is_empty());
        }
    }
}
