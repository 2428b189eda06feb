//! Appointment and consultation lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: DateTime<Utc>,
    /// Display time slot, e.g. "10:00 AM".
    pub time: String,
    pub doctor_name: String,
    pub specialty: String,
    #[serde(default)]
    pub is_video_call: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub date: DateTime<Utc>,
    pub doctor_name: String,
    pub specialty: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub prescriptions: Vec<String>,
    #[serde(default)]
    pub has_pdf: bool,
}

/// Read-only care lists shown on the Care view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareData {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub consultations: Vec<Consultation>,
}

impl CareData {
    /// Appointments on or after `now`, soonest first.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<&Appointment> {
        let mut upcoming: Vec<&Appointment> =
            self.appointments.iter().filter(|a| a.date >= now).collect();
        upcoming.sort_by_key(|a| a.date);
        upcoming
    }

    /// Past consultations, most recent first.
    pub fn recent_consultations(&self) -> Vec<&Consultation> {
        let mut recent: Vec<&Consultation> = self.consultations.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn appointment(id: &str, date: DateTime<Utc>) -> Appointment {
        Appointment {
            id: id.to_string(),
            date,
            time: "10:00 AM".to_string(),
            doctor_name: "Dr. Test".to_string(),
            specialty: "Cardiology".to_string(),
            is_video_call: false,
        }
    }

    fn consultation(id: &str, date: DateTime<Utc>) -> Consultation {
        Consultation {
            id: id.to_string(),
            date,
            doctor_name: "Dr. Test".to_string(),
            specialty: "General Medicine".to_string(),
            notes: String::new(),
            prescriptions: Vec::new(),
            has_pdf: false,
        }
    }

    #[test]
    fn test_upcoming_filters_and_sorts() {
        let now = Utc::now();
        let care = CareData {
            appointments: vec![
                appointment("later", now + Duration::days(7)),
                appointment("past", now - Duration::days(1)),
                appointment("soon", now + Duration::days(1)),
            ],
            consultations: Vec::new(),
        };

        let ids: Vec<&str> = care.upcoming(now).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["soon", "later"]);
    }

    #[test]
    fn test_recent_consultations_newest_first() {
        let now = Utc::now();
        let care = CareData {
            appointments: Vec::new(),
            consultations: vec![
                consultation("old", now - Duration::days(90)),
                consultation("new", now - Duration::days(14)),
            ],
        };

        let ids: Vec<&str> = care.recent_consultations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "appointments": [{
                "id": "app-1",
                "date": "2026-10-17T10:00:00Z",
                "time": "10:00 AM",
                "doctor_name": "Dr. Sarah Johnson",
                "specialty": "Cardiology"
            }]
        }"#;

        let care: CareData = serde_json::from_str(json).unwrap();
        assert_eq!(care.appointments.len(), 1);
        assert!(!care.appointments[0].is_video_call);
        assert!(care.consultations.is_empty());
    }
}
