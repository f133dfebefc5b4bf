use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewType {
    Direct,
    Inbound,
    Outbound,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Direct => "Direct",
            InterviewType::Inbound => "Inbound",
            InterviewType::Outbound => "Outbound",
        }
    }
}

impl std::str::FromStr for InterviewType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "Direct" => InterviewType::Direct,
            "Inbound" => InterviewType::Inbound,
            "Outbound" => InterviewType::Outbound,
            other => bail!("unknown interview type: {}", other),
        })
    }
}

/// Named client accounts candidates are interviewed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Client {
    Wonderla,
    Suzen,
    Digiphoto,
    Cospower,
    Pride,
    Chakde,
    Others,
}

impl Client {
    pub fn as_str(&self) -> &'static str {
        match self {
            Client::Wonderla => "Wonderla",
            Client::Suzen => "Suzen",
            Client::Digiphoto => "Digiphoto",
            Client::Cospower => "Cospower",
            Client::Pride => "Pride",
            Client::Chakde => "Chakde",
            Client::Others => "Others",
        }
    }
}

impl std::str::FromStr for Client {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "Wonderla" => Client::Wonderla,
            "Suzen" => Client::Suzen,
            "Digiphoto" => Client::Digiphoto,
            "Cospower" => Client::Cospower,
            "Pride" => Client::Pride,
            "Chakde" => Client::Chakde,
            "Others" => Client::Others,
            other => bail!("unknown client: {}", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    Walkin,
    #[serde(rename = "Employee Referral")]
    EmployeeReferral,
    #[serde(rename = "Job Portal")]
    JobPortal,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Others,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Walkin => "Walkin",
            SourceType::EmployeeReferral => "Employee Referral",
            SourceType::JobPortal => "Job Portal",
            SourceType::SocialMedia => "Social Media",
            SourceType::Others => "Others",
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "Walkin" => SourceType::Walkin,
            "Employee Referral" => SourceType::EmployeeReferral,
            "Job Portal" => SourceType::JobPortal,
            "Social Media" => SourceType::SocialMedia,
            "Others" => SourceType::Others,
            other => bail!("unknown source type: {}", other),
        })
    }
}

/// HR screening outcome. Always present; `Select` is what the dashboards
/// count as "selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HrStatus {
    Select,
    Reject,
    Hold,
    Backup,
    Review,
}

impl HrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HrStatus::Select => "Select",
            HrStatus::Reject => "Reject",
            HrStatus::Hold => "Hold",
            HrStatus::Backup => "Backup",
            HrStatus::Review => "Review",
        }
    }
}

impl std::str::FromStr for HrStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "Select" => HrStatus::Select,
            "Reject" => HrStatus::Reject,
            "Hold" => HrStatus::Hold,
            "Backup" => HrStatus::Backup,
            "Review" => HrStatus::Review,
            other => bail!("unknown hr status: {}", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Reject,
    Hold,
    Select,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Reject => "Reject",
            ClientStatus::Hold => "Hold",
            ClientStatus::Select => "Select",
        }
    }
}

impl std::str::FromStr for ClientStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "Reject" => ClientStatus::Reject,
            "Hold" => ClientStatus::Hold,
            "Select" => ClientStatus::Select,
            other => bail!("unknown client status: {}", other),
        })
    }
}

/// End of the recruitment funnel. Absent until the candidate reaches an
/// offer decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalStatus {
    #[serde(rename = "Offer in Progress")]
    OfferInProgress,
    Offered,
    Joined,
    #[serde(rename = "Yet to Join")]
    YetToJoin,
    #[serde(rename = "Shortlist Dropout")]
    ShortlistDropout,
    #[serde(rename = "Offer Dropout")]
    OfferDropout,
    #[serde(rename = "Joining Dropout")]
    JoiningDropout,
}

impl FinalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::OfferInProgress => "Offer in Progress",
            FinalStatus::Offered => "Offered",
            FinalStatus::Joined => "Joined",
            FinalStatus::YetToJoin => "Yet to Join",
            FinalStatus::ShortlistDropout => "Shortlist Dropout",
            FinalStatus::OfferDropout => "Offer Dropout",
            FinalStatus::JoiningDropout => "Joining Dropout",
        }
    }

    /// Statuses counted as an offer made.
    pub const OFFER: [FinalStatus; 2] = [FinalStatus::OfferInProgress, FinalStatus::Offered];

    /// Statuses counted as a dropout.
    pub const DROPOUT: [FinalStatus; 3] = [
        FinalStatus::ShortlistDropout,
        FinalStatus::OfferDropout,
        FinalStatus::JoiningDropout,
    ];
}

impl std::str::FromStr for FinalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "Offer in Progress" => FinalStatus::OfferInProgress,
            "Offered" => FinalStatus::Offered,
            "Joined" => FinalStatus::Joined,
            "Yet to Join" => FinalStatus::YetToJoin,
            "Shortlist Dropout" => FinalStatus::ShortlistDropout,
            "Offer Dropout" => FinalStatus::OfferDropout,
            "Joining Dropout" => FinalStatus::JoiningDropout,
            other => bail!("unknown final status: {}", other),
        })
    }
}

/// One logged interview call. Reports attribute a record to `created_by`
/// and bucket it by the UTC calendar day of `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub serial_ref_number: i64,
    pub date_of_call: NaiveDate,
    pub interview_type: InterviewType,
    pub client: Client,
    pub source_type: SourceType,
    pub source: String,
    pub candidate_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub gender: String,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub company_name: Option<String>,
    pub position: String,
    pub department: Option<String>,
    pub hr_comments: Option<String>,
    pub hr_status: HrStatus,
    pub comments: Option<String>,
    pub client_interview_date: Option<NaiveDate>,
    pub interview_attended: Option<String>,
    pub not_attended_comments: Option<String>,
    pub client_status: Option<ClientStatus>,
    pub client_comments: Option<String>,
    pub final_status: Option<FinalStatus>,
    pub resume: Option<String>,
    pub resume_path: Option<String>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw database row; status columns are TEXT and parsed into the typed
/// enums when converting to [`Candidate`].
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub serial_ref_number: i64,
    pub date_of_call: NaiveDate,
    pub interview_type: String,
    pub client: String,
    pub source_type: String,
    pub source: String,
    pub candidate_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub gender: String,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub company_name: Option<String>,
    pub position: String,
    pub department: Option<String>,
    pub hr_comments: Option<String>,
    pub hr_status: String,
    pub comments: Option<String>,
    pub client_interview_date: Option<NaiveDate>,
    pub interview_attended: Option<String>,
    pub not_attended_comments: Option<String>,
    pub client_status: Option<String>,
    pub client_comments: Option<String>,
    pub final_status: Option<String>,
    pub resume: Option<String>,
    pub resume_path: Option<String>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = anyhow::Error;

    fn try_from(row: CandidateRow) -> anyhow::Result<Self> {
        Ok(Candidate {
            id: row.id,
            serial_ref_number: row.serial_ref_number,
            date_of_call: row.date_of_call,
            interview_type: row.interview_type.parse()?,
            client: row.client.parse()?,
            source_type: row.source_type.parse()?,
            source: row.source,
            candidate_name: row.candidate_name,
            mobile: row.mobile,
            email: row.email,
            gender: row.gender,
            age: row.age,
            location: row.location,
            qualification: row.qualification,
            experience: row.experience,
            company_name: row.company_name,
            position: row.position,
            department: row.department,
            hr_comments: row.hr_comments,
            hr_status: row.hr_status.parse()?,
            comments: row.comments,
            client_interview_date: row.client_interview_date,
            interview_attended: row.interview_attended,
            not_attended_comments: row.not_attended_comments,
            client_status: row.client_status.as_deref().map(str::parse).transpose()?,
            client_comments: row.client_comments,
            final_status: row.final_status.as_deref().map(str::parse).transpose()?,
            resume: row.resume,
            resume_path: row.resume_path,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
