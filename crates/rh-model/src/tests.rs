//! Unit tests for rh-model.

use chrono::NaiveDate;
use rh_core::{GenerationWindow, RideRng, ZoneSet};

fn window() -> GenerationWindow {
    GenerationWindow::ending_on(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(), 7).unwrap()
}

// ── Temporal ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod temporal_tests {
    use chrono::{Datelike, Timelike};

    use super::*;
    use crate::temporal::sample_time;

    #[test]
    fn timestamps_inside_window() {
        let w = window();
        let mut rng = RideRng::new(1);
        for _ in 0..2000 {
            let t = sample_time(&w, &mut rng);
            assert!(w.contains(t.timestamp));
            assert_eq!(t.timestamp.second(), 0);
            assert_eq!(t.timestamp.hour() as u8, t.hour_of_day);
            assert_eq!(t.timestamp.weekday(), t.day_of_week);
        }
    }

    #[test]
    fn every_hour_and_day_reachable() {
        let w = window();
        let mut rng = RideRng::new(2);
        let mut hours = [false; 24];
        let mut days = std::collections::HashSet::new();
        for _ in 0..5000 {
            let t = sample_time(&w, &mut rng);
            hours[t.hour_of_day as usize] = true;
            days.insert(t.timestamp.date());
        }
        assert!(hours.iter().all(|&h| h));
        assert_eq!(days.len(), 7);
    }

    #[test]
    fn single_day_window() {
        let w = GenerationWindow::ending_on(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(), 1).unwrap();
        let mut rng = RideRng::new(3);
        for _ in 0..200 {
            let t = sample_time(&w, &mut rng);
            assert_eq!(t.timestamp.date(), NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
        }
    }
}

// ── Spatial ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial_tests {
    use super::*;
    use crate::ZoneSampler;

    #[test]
    fn pickup_never_equals_drop() {
        let zones = ZoneSet::default();
        let sampler = ZoneSampler::new(&zones).unwrap();
        let mut rng = RideRng::new(4);
        for _ in 0..5000 {
            let (p, d) = sampler.sample(&mut rng);
            assert_ne!(p, d);
            assert!(zones.label(p).is_some());
            assert!(zones.label(d).is_some());
        }
    }

    #[test]
    fn two_zones_always_swap() {
        let zones = ZoneSet::new(["North", "South"]).unwrap();
        let sampler = ZoneSampler::new(&zones).unwrap();
        let mut rng = RideRng::new(5);
        for _ in 0..500 {
            let (p, d) = sampler.sample(&mut rng);
            assert_eq!(p.0 + d.0, 1);
        }
    }

    #[test]
    fn drop_zones_roughly_uniform() {
        let zones = ZoneSet::new(["A", "B", "C", "D"]).unwrap();
        let sampler = ZoneSampler::new(&zones).unwrap();
        let mut rng = RideRng::new(6);
        let mut counts = [0usize; 4];
        for _ in 0..20_000 {
            let (_, d) = sampler.sample(&mut rng);
            counts[d.index()] += 1;
        }
        for c in counts {
            assert!((c as f64 / 20_000.0 - 0.25).abs() < 0.02, "counts {counts:?}");
        }
    }
}

// ── Physics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod physics_tests {
    use super::*;
    use crate::physics::{MIN_DISTANCE_KM, MIN_RIDE_MIN, MIN_WAIT_MIN, sample_physics};

    #[test]
    fn floors_hold() {
        let mut rng = RideRng::new(7);
        for i in 0..10_000 {
            let t = sample_physics(i % 2 == 0, &mut rng);
            assert!(t.distance_km >= MIN_DISTANCE_KM);
            assert!(t.wait_time_min >= MIN_WAIT_MIN);
            assert!(t.ride_time_min >= MIN_RIDE_MIN);
        }
    }

    #[test]
    fn duration_tracks_distance() {
        let mut rng = RideRng::new(8);
        for _ in 0..5000 {
            let t = sample_physics(false, &mut rng);
            if t.ride_time_min > MIN_RIDE_MIN {
                let pace = t.ride_time_min / t.distance_km;
                assert!((2.5..3.5).contains(&pace), "pace {pace}");
            }
        }
    }

    #[test]
    fn peak_inflates_distance_and_wait() {
        let mut rng = RideRng::new(9);
        let n = 10_000;
        let mean = |peak: bool, rng: &mut RideRng| {
            let (mut d, mut w) = (0.0, 0.0);
            for _ in 0..n {
                let t = sample_physics(peak, rng);
                d += t.distance_km;
                w += t.wait_time_min;
            }
            (d / n as f64, w / n as f64)
        };
        let (peak_d, peak_w) = mean(true, &mut rng);
        let (off_d, off_w) = mean(false, &mut rng);
        assert!(peak_d > off_d + 1.0, "{peak_d} vs {off_d}");
        assert!(peak_w > off_w + 1.0, "{peak_w} vs {off_w}");
    }
}

// ── Outcome & pricing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod outcome_tests {
    use super::*;
    use crate::outcome::{
        completion_probability, expected_rating, fare_amount, round_to, sample_rating,
    };
    use crate::{CancellationReason, ReasonSampler, TripPhysics};

    fn trip(distance_km: f64, ride_time_min: f64) -> TripPhysics {
        TripPhysics { distance_km, wait_time_min: 4.0, ride_time_min }
    }

    #[test]
    fn completion_probability_four_values() {
        assert_eq!(completion_probability(4.0, 20.0), 0.9);
        assert!((completion_probability(9.0, 20.0) - 0.87).abs() < 1e-12);
        assert!((completion_probability(4.0, 41.0) - 0.88).abs() < 1e-12);
        assert!((completion_probability(9.0, 41.0) - 0.85).abs() < 1e-12);
    }

    #[test]
    fn completion_thresholds_are_strict() {
        assert_eq!(completion_probability(8.0, 40.0), 0.9);
    }

    #[test]
    fn fare_formula_off_peak() {
        // 10 km · 18 + 30 min · 1.2 = 216
        assert_eq!(fare_amount(&trip(10.0, 30.0), false, 0.0), 216.0);
    }

    #[test]
    fn fare_formula_peak_surge() {
        // 10 km · 18 · 1.4 + 30 min · 1.2 = 288
        assert!((fare_amount(&trip(10.0, 30.0), true, 0.0) - 288.0).abs() < 1e-9);
    }

    #[test]
    fn fare_rounds_to_cents() {
        let f = fare_amount(&trip(10.0, 30.0), false, 1.23456);
        assert!((f - 217.23).abs() < 1e-9, "got {f}");
    }

    #[test]
    fn fare_floor() {
        assert_eq!(fare_amount(&trip(1.0, 5.0), false, -50.0), 40.0);
    }

    #[test]
    fn rating_clipped_and_rounded() {
        let mut rng = RideRng::new(10);
        for wait in [1.0, 5.0, 12.0, 30.0] {
            for _ in 0..2000 {
                let r = sample_rating(wait, &mut rng);
                assert!((2.5..=5.0).contains(&r), "rating {r}");
                assert!((r * 10.0 - (r * 10.0).round()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn longer_waits_lower_expected_rating() {
        assert!(expected_rating(2.0) > expected_rating(10.0));
        assert!((expected_rating(10.0) - 4.3).abs() < 1e-12);
    }

    #[test]
    fn reasons_follow_weights() {
        let sampler = ReasonSampler::new().unwrap();
        let mut rng = RideRng::new(11);
        let n = 20_000;
        let no_shows = (0..n)
            .filter(|_| sampler.sample(&mut rng) == CancellationReason::DriverNoShow)
            .count();
        assert!((no_shows as f64 / n as f64 - 0.5).abs() < 0.02);
    }

    #[test]
    fn reason_labels_round_trip() {
        for r in CancellationReason::ALL {
            assert_eq!(CancellationReason::from_label(r.label()), Some(r));
        }
        assert_eq!(CancellationReason::from_label("Weather"), None);
        assert_eq!(CancellationReason::WEIGHTS.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
        assert_eq!(round_to(0.125, 2), 0.13);
    }
}

// ── StandardRideModel ─────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use rh_core::{GeneratorConfig, RideId};

    use super::*;
    use crate::{RideModel, RideOutcome, StandardRideModel};

    fn model() -> StandardRideModel {
        StandardRideModel::new(window(), ZoneSet::default(), 80, 300).unwrap()
    }

    #[test]
    fn same_seed_same_record() {
        let m = model();
        let a = m.sample_ride(RideId(1), &mut RideRng::new(42));
        let b = m.sample_ride(RideId(1), &mut RideRng::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn record_invariants() {
        let m = model();
        let mut rng = RideRng::new(12);
        for i in 1..=3000 {
            let r = m.sample_ride(RideId(i), &mut rng);
            assert_eq!(r.ride_id, RideId(i));
            assert_ne!(r.pickup_zone, r.drop_zone);
            assert!(r.fare_amount >= 40.0);
            assert!((1..=80).contains(&r.driver_id.0));
            assert!((1..=300).contains(&r.rider_id.0));
            match r.outcome {
                RideOutcome::Completed { rating } => {
                    assert!(r.cancellation_reason().is_none());
                    assert!((2.5..=5.0).contains(&rating));
                }
                RideOutcome::Cancelled { .. } => assert!(r.rating().is_none()),
            }
        }
    }

    #[test]
    fn zero_pool_rejected() {
        assert!(StandardRideModel::new(window(), ZoneSet::default(), 0, 300).is_err());
    }

    #[test]
    fn from_config_rejects_bad_zones() {
        let cfg = GeneratorConfig { zones: vec!["One".into()], ..Default::default() };
        assert!(StandardRideModel::from_config(&cfg).is_err());
    }
}
