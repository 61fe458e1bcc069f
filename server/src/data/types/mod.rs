//! Row and input types for the transactional tables
//!
//! Serialized with camelCase names, matching the field names callers use in
//! filter objects and update payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

pub(crate) type CompanyTuple = (String, String, String, Option<i32>, Option<String>);

impl From<CompanyTuple> for CompanyRow {
    fn from((handle, name, description, num_employees, logo_url): CompanyTuple) -> Self {
        Self {
            handle,
            name,
            description,
            num_employees,
            logo_url,
        }
    }
}

/// Company with its job listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub jobs: Vec<JobRow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// NUMERIC, read back as text to keep the stored precision
    pub equity: Option<String>,
    pub company_handle: String,
}

pub(crate) type JobTuple = (i32, String, Option<i32>, Option<String>, String);

impl From<JobTuple> for JobRow {
    fn from((id, title, salary, equity, company_handle): JobTuple) -> Self {
        Self {
            id,
            title,
            salary,
            equity,
            company_handle,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

pub(crate) type UserTuple = (String, String, String, String, bool);

impl From<UserTuple> for UserRow {
    fn from((username, first_name, last_name, email, is_admin): UserTuple) -> Self {
        Self {
            username,
            first_name,
            last_name,
            email,
            is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_serializes_camel_case() {
        let company = CompanyRow::from((
            "c1".to_string(),
            "C1".to_string(),
            "Desc1".to_string(),
            Some(1),
            Some("http://c1.img".to_string()),
        ));
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["numEmployees"], 1);
        assert_eq!(json["logoUrl"], "http://c1.img");
    }

    #[test]
    fn company_detail_flattens_company() {
        let detail = CompanyDetail {
            company: CompanyRow::from((
                "c1".to_string(),
                "C1".to_string(),
                "Desc1".to_string(),
                None,
                None,
            )),
            jobs: vec![JobRow::from((
                1,
                "carpenter".to_string(),
                Some(30000),
                Some("0.1".to_string()),
                "c1".to_string(),
            ))],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["handle"], "c1");
        assert_eq!(json["jobs"][0]["companyHandle"], "c1");
        assert_eq!(json["jobs"][0]["equity"], "0.1");
    }

    #[test]
    fn new_job_deserializes_camel_case() {
        let job: NewJob = serde_json::from_str(
            r#"{"title": "gardener", "salary": 65000, "equity": 0.1, "companyHandle": "c1"}"#,
        )
        .unwrap();
        assert_eq!(job.company_handle, "c1");
        assert_eq!(job.equity, Some(0.1));
    }
}
