use crate::models::profile::{ResumeProfile, PROFILE_ID};

/// Resume used whenever no stored profile is available.
pub const DEFAULT_RESUME_TEXT: &str = "MUTHUSAMY M
Software Engineer

CONTACT:
Email: muthusamy@example.com
LinkedIn: https://www.linkedin.com/in/muthusamy
GitHub: https://github.com/muthusamy

OBJECTIVE:
Seeking an entry-level position in Information Technology where I can leverage my technical expertise, problem-solving abilities, and passion for innovation to drive organizational success.

EDUCATION:
- B.TECH [Information Technology] (2022-2026): DR.N.G.P INSTITUTE OF TECHNOLOGY - 84%
- 12th Standard (2022): A.R.CHENNIMALAIGOUNDER MATRIC HR SEC SCHOOL - 90.6%
- 10th Standard (2020): A.R.CHENNIMALAIGOUNDER MATRIC HR SEC SCHOOL - 95%

SKILLS:
- Programming Languages: Java, C
- Web Development: HTML, CSS, JavaScript
- Database Management: SQL
- Tools: Android Studio, Visual Studio Code, Arduino IDE, Canva, NS2

PROJECTS:
1. Restaurant Recommendation System (2023)
   - Tool Used: HTML, CSS, JavaScript
   - Description: Developed a web-based application to recommend restaurants based on user preferences. Designed and implemented the user interface; Integrated and tested recommendation algorithms.

2. Data Dissemination for Traffic Prevention in NS2 Stimulation Using Access Point (2024)
   - Tools Used: NS2
   - Description: This project focuses on data dissemination in Vehicular Ad Hoc Networks (VANET) using access points to prevent traffic congestion. NS2 simulation is utilized to evaluate the effectiveness of the approach in improving traffic flow.

3. Smart Campus Cleanliness Management System (2025)
   - Technologies Used: App Development, IoT
   - Description: Created a digital solution to manage campus cleanliness efficiently. Led the development of the app interface and integrated IoT devices for real-time cleanliness monitoring.

INTERNSHIPS:
- Low Code Platform Intern at Pinesphere Solutions (2024): Gained hands-on experience with low-code platforms using WordPress, rapidly developing and deploying websites with no coding.
- Technical Internship at National Institute of Technology, Tiruchirapalli: Focused on data creation for machine learning applications. Developed and published a dataset of Cowrie Shells on Kaggle.
- Industry Internship at KrishTec in Coimbatore: Focused on IoT fundamentals, developing responsive IoT applications.

CERTIFICATIONS:
- Programming in Java (NPTEL) (60%, April-2024)
- IoT and Web 4.0 (NPTEL) (65%, October-2024)
- DSA Training - Finest Coder & CodingMart Technologies

ACHIEVEMENTS:
- Secured Elite Certification in Introduction to Industry 4.0 and IIoT (NPTEL).
- Won Second Place in Code Debugging and Modelathon, KIT, Coimbatore.
- Won First Place in Classical Group Dance (Oyilattam) District Level Coimbatore.

LEADERSHIP ACTIVITIES:
- Served as Office Bearer of XEMAC (IT Association), leading peers in organizing technical and cultural events.
- Coordinated project presentations and guided juniors in technical tasks.
- Mentored peers during coding/debugging contests.
";

pub fn default_profile() -> ResumeProfile {
    ResumeProfile {
        id: PROFILE_ID.to_string(),
        linkedin: "https://www.linkedin.com/in/muthusamy".to_string(),
        github: "https://github.com/muthusamy".to_string(),
        image_url: Some("https://picsum.photos/200/200".to_string()),
        resume_url: String::new(),
        resume_text: DEFAULT_RESUME_TEXT.to_string(),
        updated_at: None,
    }
}
