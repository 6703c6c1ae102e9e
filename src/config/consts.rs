use crate::domain::model::Department;
use std::time::Duration;

/// Kisarazu KOSEN's school identifier on the public syllabus site.
pub const SCHOOL_ID: &str = "14";

/// Fixed department catalog. Order matters: the first entry is the default
/// when no code is given.
pub const DEPARTMENTS: &[Department] = &[
    Department {
        code: "M",
        id: "11",
        name: "機械工学科",
    },
    Department {
        code: "E",
        id: "12",
        name: "電気電子工学科",
    },
    Department {
        code: "D",
        id: "13",
        name: "電子制御工学科",
    },
    Department {
        code: "J",
        id: "14",
        name: "情報工学科",
    },
    Department {
        code: "C",
        id: "15",
        name: "環境都市工学科",
    },
];

pub const DEFAULT_YEAR: &str = "2021";

pub const BASE_URL: &str = "https://syllabus.kosen-k.go.jp/Pages/PublicSubjects";

pub const USER_AGENT: &str = "CreditCounter/1.0 (+https://github.com/yoji/)";

pub const ACCEPT_LANGUAGE: &str = "ja,en;q=0.8";

pub const CACHE_TTL: Duration = Duration::from_secs(60 * 15);

/// Wall-clock bound on one external generator invocation.
pub const GENERATOR_TIMEOUT: Duration = Duration::from_secs(60);

/// Cap on the generator's combined stdout + stderr, in bytes.
pub const GENERATOR_OUTPUT_CAP: usize = 1024 * 1024;
