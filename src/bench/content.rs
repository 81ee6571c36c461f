// Static copy of the dashboard pages.

use aid_scoring::ProgramLevel;

/// The pages of the dashboard, in menu order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Section {
    Overview,
    Undergraduate,
    Master,
    Recommendations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Undergraduate,
        Section::Master,
        Section::Recommendations,
    ];

    pub fn parse(s: &str) -> Option<Section> {
        match s.to_ascii_lowercase().as_str() {
            "overview" | "description" => Some(Section::Overview),
            "recommendations" => Some(Section::Recommendations),
            other => ProgramLevel::parse(other).map(Section::from),
        }
    }

    /// The program level compared on this page, if it is a comparison page.
    pub fn level(&self) -> Option<ProgramLevel> {
        match self {
            Section::Undergraduate => Some(ProgramLevel::Undergraduate),
            Section::Master => Some(ProgramLevel::Master),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Project description",
            Section::Undergraduate => "Scholarship comparator: undergraduate programs",
            Section::Master => "Scholarship comparator: master programs",
            Section::Recommendations => "Strategic recommendations",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Section::Overview => OVERVIEW,
            Section::Undergraduate => UNDERGRADUATE_INTRO,
            Section::Master => MASTER_INTRO,
            Section::Recommendations => RECOMMENDATIONS,
        }
    }
}

impl From<ProgramLevel> for Section {
    fn from(level: ProgramLevel) -> Section {
        match level {
            ProgramLevel::Undergraduate => Section::Undergraduate,
            ProgramLevel::Master => Section::Master,
        }
    }
}

pub const DEFAULT_TITLE: &str = "University comparison by financial aid";

pub const RADAR_GUIDANCE: &str = "Select at least two universities to see the radar chart.";

const OVERVIEW: &str = "\
This project is a structured analysis of the financial aid policies of leading
international universities. It compares the transparency, coverage and variety
of the aid on offer, the application processes, the published documentation and
calendars, and the digital tools used to communicate scholarships.

The dashboard is organised in four sections:
  1. Scholarship comparator for undergraduate programs
  2. Scholarship comparator for master programs
  3. Strategic recommendations
  4. This description";

const UNDERGRADUATE_INTRO: &str = "\
Compares the financial aid strategy of international universities for
undergraduate degrees. Select universities to explore their scholarships,
transparency and student support.";

const MASTER_INTRO: &str = "\
Compares the financial aid policies of international universities for master
programs. Select universities to explore their scholarships, level of
transparency and support tools.";

const RECOMMENDATIONS: &str = "\
Undergraduate
  1. A light pre-admission financial app: estimated total cost per campus,
     available aid by nationality or profile, personalised calendar.
  2. An anonymous, non-binding financial profile test suggesting matching aid,
     useful documentation and the options similar profiles usually request.
  3. A visual map of aid by region or country, with requirements and statistics.
  4. An informal profile pre-validation without login: indicative eligibility,
     most likely aid types and suggested documentation.

Master
  5. Publish indicative historical award rates per program, by band
     (<25%, 25-50%, >50%).
  6. Finer segmentation in the financial simulator: exact program, estimated
     success rates by profile, downloadable report.
  7. A post-award information pack: personalised breakdown, financing and
     deferral options, confirmation deadlines.
  8. Show the qualitative criteria valued during the evaluation.

Common
  9. Visible thematic scholarships (technology with purpose, women in
     leadership, social impact in emerging markets).
 10. Real success stories focused on financial aid, by program and region.";
