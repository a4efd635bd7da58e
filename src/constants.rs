//! Application constants for the lab data processor
//!
//! Default file names, column names, category lookup tables and
//! statistical thresholds used throughout the processor.

// =============================================================================
// Input and Output File Names
// =============================================================================

/// Block-structured lipase measurement export
pub const LIPASE_MEASUREMENT_FILE: &str = "UE_Sonstiges_Ergebnisse-Lipase.csv";

/// Participant list accompanying the lipase experiment
pub const LIPASE_PARTICIPANT_FILE: &str = "UE_Sonstiges_Ergebnisse-TN-Liste.csv";

/// Rectangular tactile (two-point discrimination) measurement export
pub const TACTILE_MEASUREMENT_FILE: &str = "UE_Sinne_Ergebnisse-Berührung.csv";

/// Participant list accompanying the tactile experiment
pub const TACTILE_PARTICIPANT_FILE: &str = "UE_Sinne_Ergebnisse-TN-Liste.csv";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "../data";

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "out";

pub mod outputs {
    pub const LIPASE_TIDY: &str = "lipase_tidy.csv";
    pub const LIPASE_DROPS: &str = "lipase_drops.csv";
    pub const LIPASE_TESTS: &str = "lipase_tests.csv";
    pub const LIPASE_PAIRWISE: &str = "lipase_pairwise.csv";
    pub const LIPASE_CURVES: &str = "lipase_ph_curves.png";
    pub const LIPASE_REPORT: &str = "lipase_report.txt";

    pub const TACTILE_DESCRIPTIVE: &str = "descriptive_statistics.csv";
    pub const TACTILE_REGIONS: &str = "region_comparisons.csv";
    pub const TACTILE_GENDERS: &str = "gender_comparisons.csv";
    pub const TACTILE_BOXPLOT: &str = "body_regions_boxplot.png";
    pub const TACTILE_GENDER_CHART: &str = "gender_comparison.png";
    pub const TACTILE_HEATMAP: &str = "correlation_heatmap.png";
    pub const TACTILE_DISTRIBUTIONS: &str = "distributions.png";
    pub const TACTILE_REPORT: &str = "analysis_report.txt";
}

// =============================================================================
// Column Names
// =============================================================================

pub mod columns {
    /// Date of the course session
    pub const DATE: &str = "Datum";

    /// Course session identifier
    pub const SESSION: &str = "Stdgang";

    /// Participant identifier within a session
    pub const PERSON: &str = "Person";

    /// Elapsed time column of the lipase measurement file (minutes)
    pub const TIME: &str = "Zeit";

    pub const GENDER: &str = "Geschlecht";
    pub const AGE: &str = "Alter";
    pub const SMOKER: &str = "Raucher";
    pub const VISUAL_AID: &str = "Sehhilfe";

    /// Output names of the two dependent lipase value columns
    pub const PH_COOKED: &str = "pH_gekocht";
    pub const PH_UNCOOKED: &str = "pH_ungekocht";

    /// Participant join keys shared by measurement and participant files
    pub const PARTICIPANT_KEYS: &[&str] = &[DATE, SESSION, PERSON];
}

// =============================================================================
// Missing Value Tokens
// =============================================================================

/// Cell spellings that mean "no value" in the exports, compared after trimming
pub const MISSING_TOKENS: &[&str] = &["", "-", "NA", "NaN", "nan"];

// =============================================================================
// Category Lookup Tables
// =============================================================================

pub mod categories {
    pub const UNKNOWN: &str = "Unknown";

    pub const MALE: &str = "Male";
    pub const FEMALE: &str = "Female";
    pub const DIVERSE: &str = "Diverse";

    /// Gender codes (lowercased) to display labels
    pub const GENDER_CODES: &[(&str, &str)] = &[
        ("m", MALE),
        ("männlich", MALE),
        ("male", MALE),
        ("w", FEMALE),
        ("weiblich", FEMALE),
        ("f", FEMALE),
        ("female", FEMALE),
        ("d", DIVERSE),
        ("divers", DIVERSE),
    ];

    /// Smoker status codes (lowercased) to display labels
    pub const SMOKER_CODES: &[(&str, &str)] = &[
        ("ja", "Smoker"),
        ("j", "Smoker"),
        ("yes", "Smoker"),
        ("y", "Smoker"),
        ("1", "Smoker"),
        ("nein", "Non-smoker"),
        ("n", "Non-smoker"),
        ("no", "Non-smoker"),
        ("0", "Non-smoker"),
    ];

    /// Visual aid flags (lowercased) to display labels
    pub const VISUAL_AID_CODES: &[(&str, &str)] = &[
        ("brille", "Glasses"),
        ("kontaktlinsen", "Contact lenses"),
        ("kl", "Contact lenses"),
        ("keine", "None"),
        ("nein", "None"),
        ("n", "None"),
        ("0", "None"),
        ("ja", "Unspecified aid"),
        ("j", "Unspecified aid"),
        ("1", "Unspecified aid"),
    ];

    /// Body regions measured in the tactile experiment, German header -> English label
    pub const BODY_REGIONS: &[(&str, &str)] = &[
        ("Handrücken", "Hand Back"),
        ("Fingerkuppe", "Fingertip"),
        ("Unterarm", "Forearm"),
        ("Rücken", "Back"),
        ("Handfläche", "Palm"),
    ];

    /// Right-inclusive age bins: (lower exclusive, upper inclusive, label)
    pub const AGE_GROUPS: &[(f64, f64, &str)] = &[
        (0.0, 20.0, "<20"),
        (20.0, 25.0, "20-25"),
        (25.0, 30.0, "25-30"),
        (30.0, 100.0, ">30"),
    ];
}

// =============================================================================
// Statistical Thresholds
// =============================================================================

/// Default significance level for all hypothesis tests
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Minimum number of observations per sample for a t-test
pub const MIN_SAMPLES_PER_GROUP: usize = 2;

/// Histogram bin count for distribution charts
pub const HISTOGRAM_BINS: usize = 15;
