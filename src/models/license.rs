//! License model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record};
use crate::validation::{Validator, ViolationKind, Violations};

status_enum! {
    LicenseStatus {
        #[default]
        Pending => "pending",
        Issued => "issued",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub holder_national_id: String,
    pub holder_name: String,
    pub license_class: String,
    /// Empty while the license is pending
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: LicenseStatus,
}

impl Entity for License {
    const KIND: EntityKind = EntityKind::License;

    fn display_name(&self) -> &str {
        &self.holder_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.holder_name, &self.holder_national_id, &self.license_class]
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn status_domain() -> Vec<&'static str> {
        LicenseStatus::ALL.iter().map(|s| s.label()).collect()
    }

    fn validate(&self, _today: NaiveDate) -> Violations {
        let mut v = Validator::new();

        v.require_text("holder national id", &self.holder_national_id);
        v.require_text("holder name", &self.holder_name);
        v.require_text("license class", &self.license_class);

        if self.status == LicenseStatus::Issued {
            if self.issue_date.is_none() {
                v.push("issue date", ViolationKind::RequiredWhenIssued);
            }
            if self.expiry_date.is_none() {
                v.push("expiry date", ViolationKind::RequiredWhenIssued);
            }
        }

        if let (Some(issued), Some(expires)) = (self.issue_date, self.expiry_date) {
            v.date_span("issue date", issued, "expiry date", expires, 0);
        }

        v.finish()
    }

    fn seed() -> Vec<Record<Self>> {
        fn license(
            id: &str,
            national_id: &str,
            name: &str,
            class: &str,
            issued: Option<(i32, u32, u32)>,
            status: LicenseStatus,
        ) -> Record<License> {
            let issue_date = issued.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
            let expiry_date = issued.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y + 10, m, d));
            Record::local(id, License {
                holder_national_id: national_id.to_string(),
                holder_name: name.to_string(),
                license_class: class.to_string(),
                issue_date,
                expiry_date,
                status,
            })
        }

        vec![
            license(
                "1001",
                "001090000001",
                "Nguyễn Văn A",
                "B1",
                Some((2023, 6, 1)),
                LicenseStatus::Issued,
            ),
            license(
                "1002",
                "079192000002",
                "Trần Thị B",
                "A1",
                Some((2023, 6, 2)),
                LicenseStatus::Issued,
            ),
            license(
                "1003",
                "048085000003",
                "Lê Văn C",
                "B2",
                Some((2023, 6, 3)),
                LicenseStatus::Issued,
            ),
            license("1004", "092195000004", "Phạm Thị D", "B1", None, LicenseStatus::Pending),
            license("1005", "031088000005", "Hoàng Văn E", "A2", None, LicenseStatus::Pending),
        ]
    }
}
