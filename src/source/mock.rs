//! Built-in demo data.
//!
//! Serves the four demo vitals with their recent histories, randomized trend
//! series, demo care lists dated relative to the caller's clock and a fixed
//! recommendation list. Each call to
//! `fetch_vitals` after the first simulates a new reading per vital and
//! rolls its history window.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::VitalsRepository;
use crate::data::sparkline::HISTORY_LEN;
use crate::data::{
    default_profiles, AggregatePoint, Appointment, CareData, Consultation, RollingHistory,
    TrendWindow, VitalProfile, VitalSample, VitalValue,
};
use crate::error::Result;

/// How a demo reading moves between refreshes.
#[derive(Debug, Clone, Copy)]
enum Reading {
    Scalar { value: f64, step: f64, decimals: i32 },
    Pressure { systolic: f64, diastolic: f64 },
}

#[derive(Debug)]
struct MockVital {
    profile: VitalProfile,
    reading: Reading,
    history: RollingHistory,
}

impl MockVital {
    fn new(profile: VitalProfile) -> Self {
        let scalar = |value, step, decimals| Reading::Scalar {
            value,
            step,
            decimals,
        };
        let (reading, history) = match profile.id.as_str() {
            "heart-rate" => (
                scalar(72.0, 2.0, 0),
                vec![68.0, 70.0, 67.0, 72.0, 70.0, 69.0, 72.0],
            ),
            "spo2" => (
                scalar(98.0, 1.0, 0),
                vec![98.0, 97.0, 99.0, 98.0, 98.0, 97.0, 98.0],
            ),
            "temperature" => (
                scalar(37.2, 0.1, 1),
                vec![36.8, 36.9, 37.0, 37.1, 37.2, 37.0, 37.2],
            ),
            "blood-pressure" => (
                Reading::Pressure {
                    systolic: 120.0,
                    diastolic: 80.0,
                },
                vec![120.0, 118.0, 122.0, 119.0, 120.0, 121.0, 120.0],
            ),
            _ => {
                let normal = profile.normal_range;
                let mid = (normal.low() + normal.high()) / 2.0;
                let step = (normal.high() - normal.low()) / 20.0;
                (scalar(mid, step, 1), vec![mid; HISTORY_LEN])
            }
        };

        Self {
            profile,
            reading,
            history: RollingHistory::from_values(&history, HISTORY_LEN),
        }
    }

    /// Outer bounds a simulated reading may drift to.
    fn bounds(&self) -> (f64, f64) {
        let normal = self.profile.normal_range;
        let warning = self.profile.warning_range;
        (normal.low().min(warning.low()), normal.high().max(warning.high()))
    }

    fn advance(&mut self, rng: &mut StdRng) {
        let (low, high) = self.bounds();
        self.reading = match self.reading {
            Reading::Scalar {
                value,
                step,
                decimals,
            } => {
                let next = round_to(value + rng.gen_range(-step..=step), decimals).clamp(low, high);
                self.history.push(next);
                Reading::Scalar {
                    value: next,
                    step,
                    decimals,
                }
            }
            Reading::Pressure {
                systolic,
                diastolic,
            } => {
                let systolic = (systolic + rng.gen_range(-2.0..=2.0_f64)).round().clamp(low, high);
                let diastolic = (diastolic + rng.gen_range(-1.0..=1.0_f64)).round();
                self.history.push(systolic);
                Reading::Pressure {
                    systolic,
                    diastolic,
                }
            }
        };
    }

    fn sample(&self, now: DateTime<Utc>) -> Result<VitalSample> {
        let value = match self.reading {
            Reading::Scalar { value, .. } => VitalValue::Scalar(value),
            Reading::Pressure {
                systolic,
                diastolic,
            } => VitalValue::Composite(format!("{}/{}", systolic, diastolic)),
        };
        VitalSample::new(self.profile.clone(), value, now, self.history.to_vec())
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug)]
struct MockState {
    rng: StdRng,
    vitals: Vec<MockVital>,
    served: bool,
}

/// Demo repository backed by in-memory data.
#[derive(Debug)]
pub struct MockRepository {
    state: Mutex<MockState>,
    recommendations: Vec<String>,
}

impl MockRepository {
    /// Demo data for the given range table with an optional fixed seed.
    pub fn new(profiles: Vec<VitalProfile>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: Mutex::new(MockState {
                rng,
                vitals: profiles.into_iter().map(MockVital::new).collect(),
                served: false,
            }),
            recommendations: demo_recommendations(),
        }
    }

    /// Default range table with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::new(default_profiles(), Some(seed))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new(default_profiles(), None)
    }
}

impl VitalsRepository for MockRepository {
    fn fetch_vitals(&self, now: DateTime<Utc>) -> Result<Vec<VitalSample>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let MockState {
            rng,
            vitals,
            served,
        } = &mut *state;

        // The first snapshot is the seed data; later ones simulate a new reading.
        if *served {
            for vital in vitals.iter_mut() {
                vital.advance(rng);
            }
        }
        *served = true;

        vitals.iter().map(|v| v.sample(now)).collect()
    }

    fn fetch_series(&self, window: TrendWindow, today: NaiveDate) -> Result<Vec<AggregatePoint>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(generate_series(window, today, &mut state.rng))
    }

    /// Demo appointments and consultations dated relative to `now`.
    fn fetch_care(&self, now: DateTime<Utc>) -> Result<CareData> {
        Ok(demo_care(now))
    }

    fn fetch_recommendations(&self) -> Result<Vec<String>> {
        Ok(self.recommendations.clone())
    }

    fn description(&self) -> &str {
        "demo data"
    }
}

/// Value spreads per window: `base + uniform[0, span)`.
struct Spread {
    heart_rate: (f64, u32),
    spo2: (f64, u32),
    temperature: (f64, f64),
    hydration: (u8, u8),
}

fn spread(window: TrendWindow) -> Spread {
    match window {
        TrendWindow::SevenDays => Spread {
            heart_rate: (65.0, 15),
            spo2: (95.0, 5),
            temperature: (36.5, 1.0),
            hydration: (50, 40),
        },
        TrendWindow::ThirtyDays => Spread {
            heart_rate: (65.0, 20),
            spo2: (93.0, 7),
            temperature: (36.2, 1.5),
            hydration: (40, 50),
        },
        TrendWindow::OneYear => Spread {
            heart_rate: (65.0, 15),
            spo2: (94.0, 6),
            temperature: (36.4, 1.2),
            hydration: (45, 45),
        },
    }
}

/// Random aggregate points for every bucket of `window`, ending at `today`.
pub fn generate_series<R: Rng>(
    window: TrendWindow,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<AggregatePoint> {
    let spread = spread(window);
    window
        .bucket_labels(today)
        .into_iter()
        .map(|bucket_label| AggregatePoint {
            bucket_label,
            heart_rate: spread.heart_rate.0 + rng.gen_range(0..spread.heart_rate.1) as f64,
            spo2: spread.spo2.0 + rng.gen_range(0..spread.spo2.1) as f64,
            temperature: round_to(spread.temperature.0 + rng.gen::<f64>() * spread.temperature.1, 2),
            hydration_pct: spread.hydration.0 + rng.gen_range(0..spread.hydration.1),
        })
        .collect()
}

fn demo_care(now: DateTime<Utc>) -> CareData {
    let appointment = |id: &str, days: i64, time: &str, doctor: &str, specialty: &str, video| {
        Appointment {
            id: id.to_string(),
            date: now + Duration::days(days),
            time: time.to_string(),
            doctor_name: doctor.to_string(),
            specialty: specialty.to_string(),
            is_video_call: video,
        }
    };

    CareData {
        appointments: vec![
            appointment("app-1", 1, "10:00 AM", "Dr. Sarah Johnson", "Cardiology", true),
            appointment("app-2", 4, "2:30 PM", "Dr. Michael Chen", "General Medicine", false),
            appointment("app-3", 7, "11:15 AM", "Dr. Emily Rodriguez", "Dermatology", true),
        ],
        consultations: vec![
            Consultation {
                id: "cons-1".to_string(),
                date: now - Duration::days(14),
                doctor_name: "Dr. Sarah Johnson".to_string(),
                specialty: "Cardiology".to_string(),
                notes: "Heart rate normal. Advised to monitor blood pressure daily.".to_string(),
                prescriptions: vec!["Amlodipine 5mg".to_string(), "Aspirin 75mg".to_string()],
                has_pdf: true,
            },
            Consultation {
                id: "cons-2".to_string(),
                date: now - Duration::days(30),
                doctor_name: "Dr. Michael Chen".to_string(),
                specialty: "General Medicine".to_string(),
                notes: "Flu-like symptoms. Prescribed rest and increased fluid intake.".to_string(),
                prescriptions: vec!["Paracetamol 500mg".to_string(), "Cetirizine 10mg".to_string()],
                has_pdf: true,
            },
            Consultation {
                id: "cons-3".to_string(),
                date: now - Duration::days(90),
                doctor_name: "Dr. Emily Rodriguez".to_string(),
                specialty: "Dermatology".to_string(),
                notes: "Mild eczema on left arm. Topical cream; avoid harsh detergents.".to_string(),
                prescriptions: vec!["Hydrocortisone 1% cream".to_string()],
                has_pdf: false,
            },
        ],
    }
}

fn demo_recommendations() -> Vec<String> {
    [
        "Based on your heart rate pattern, consider short meditation sessions.",
        "Your hydration is below optimal. Try drinking 2 more glasses of water daily.",
        "Your sleep quality could improve with a consistent bedtime routine.",
        "Your SpO₂ levels are optimal. Keep up your current activity levels.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
