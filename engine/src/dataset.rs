use std::collections::HashMap;

use crate::record::{DatasetSummary, SalaryRange, SalaryRecord, SkillCount};

/// How many entries the top-skills ranking keeps.
const TOP_SKILLS: usize = 10;

#[allow(clippy::too_many_arguments)]
fn record(
    id: u32,
    years: f64,
    education: &str,
    title: &str,
    location: &str,
    size: &str,
    skills: &[&str],
    salary: f64,
    industry: &str,
    mode: &str,
) -> SalaryRecord {
    SalaryRecord {
        id,
        years_experience: years,
        education_level: education.to_owned(),
        job_title: title.to_owned(),
        location: location.to_owned(),
        company_size: size.to_owned(),
        skills: skills.iter().map(|s| (*s).to_owned()).collect(),
        salary,
        industry: industry.to_owned(),
        work_mode: mode.to_owned(),
    }
}

/// The embedded demo dataset: 35 salary records.
pub fn sample_records() -> Vec<SalaryRecord> {
    vec![
        record(1, 2.0, "Bachelor's", "Software Engineer", "Bangalore", "Large", &["JavaScript", "React", "Node.js"], 800_000.0, "Technology", "Hybrid"),
        record(2, 5.0, "Master's", "Senior Software Engineer", "Hyderabad", "Large", &["Python", "Django", "AWS", "Docker"], 1_800_000.0, "Technology", "Remote"),
        record(3, 1.0, "Bachelor's", "Junior Software Engineer", "Pune", "Medium", &["Java", "Spring Boot"], 600_000.0, "Technology", "Office"),
        record(4, 8.0, "Master's", "Tech Lead", "Mumbai", "Large", &["Java", "Microservices", "Kubernetes", "Leadership"], 2_800_000.0, "Technology", "Hybrid"),
        record(5, 3.0, "Bachelor's", "Frontend Developer", "Chennai", "Medium", &["React", "TypeScript", "CSS"], 1_200_000.0, "Technology", "Remote"),
        record(6, 4.0, "Master's", "Data Scientist", "Bangalore", "Large", &["Python", "Machine Learning", "SQL", "Pandas"], 1_600_000.0, "Technology", "Hybrid"),
        record(7, 6.0, "PhD", "Senior Data Scientist", "Delhi", "Large", &["Python", "Deep Learning", "TensorFlow", "Statistics"], 2_500_000.0, "Technology", "Remote"),
        record(8, 2.0, "Master's", "Data Analyst", "Kolkata", "Medium", &["Python", "SQL", "Tableau"], 900_000.0, "Finance", "Office"),
        record(9, 5.0, "MBA", "Product Manager", "Bangalore", "Large", &["Strategy", "Analytics", "Agile"], 2_200_000.0, "Technology", "Hybrid"),
        record(10, 3.0, "Bachelor's", "Associate Product Manager", "Gurgaon", "Medium", &["Product Strategy", "User Research"], 1_400_000.0, "E-commerce", "Office"),
        record(11, 4.0, "Bachelor's", "DevOps Engineer", "Pune", "Medium", &["AWS", "Docker", "Jenkins", "Terraform"], 1_500_000.0, "Technology", "Remote"),
        record(12, 6.0, "Master's", "Senior DevOps Engineer", "Bangalore", "Large", &["Kubernetes", "AWS", "CI/CD", "Monitoring"], 2_300_000.0, "Technology", "Hybrid"),
        record(13, 5.0, "Master's", "Software Engineer", "San Francisco", "Large", &["Python", "React", "AWS"], 9_500_000.0, "Technology", "Hybrid"),
        record(14, 3.0, "Bachelor's", "Software Engineer", "London", "Large", &["JavaScript", "Node.js", "MongoDB"], 4_200_000.0, "Technology", "Remote"),
        record(15, 4.0, "Master's", "Data Scientist", "Toronto", "Medium", &["Python", "ML", "SQL"], 5_800_000.0, "Technology", "Hybrid"),
        record(16, 7.0, "Master's", "Engineering Manager", "Bangalore", "Large", &["Leadership", "Java", "Architecture"], 3_200_000.0, "Technology", "Hybrid"),
        record(17, 2.0, "Bachelor's", "QA Engineer", "Noida", "Medium", &["Testing", "Selenium", "Java"], 700_000.0, "Technology", "Office"),
        record(18, 4.0, "Bachelor's", "Backend Developer", "Hyderabad", "Large", &["Node.js", "MongoDB", "Express"], 1_600_000.0, "Technology", "Remote"),
        record(19, 6.0, "Master's", "Machine Learning Engineer", "Mumbai", "Large", &["Python", "TensorFlow", "MLOps"], 2_400_000.0, "Technology", "Hybrid"),
        record(20, 3.0, "Bachelor's", "Mobile Developer", "Chennai", "Medium", &["React Native", "Flutter", "Firebase"], 1_300_000.0, "Technology", "Remote"),
        record(21, 4.0, "MBA", "Business Analyst", "Mumbai", "Large", &["Excel", "SQL", "PowerBI"], 1_800_000.0, "Finance", "Office"),
        record(22, 6.0, "Master's", "Financial Analyst", "Delhi", "Large", &["Financial Modeling", "Excel", "Python"], 2_000_000.0, "Finance", "Hybrid"),
        record(23, 3.0, "MBA", "Management Consultant", "Bangalore", "Large", &["Strategy", "Analytics", "Presentation"], 2_500_000.0, "Consulting", "Hybrid"),
        record(24, 4.0, "Bachelor's", "UX Designer", "Bangalore", "Medium", &["Figma", "User Research", "Prototyping"], 1_400_000.0, "Technology", "Hybrid"),
        record(25, 5.0, "Master's", "Digital Marketing Manager", "Mumbai", "Large", &["SEO", "Google Ads", "Analytics"], 1_600_000.0, "E-commerce", "Remote"),
        record(26, 3.0, "Bachelor's", "Sales Executive", "Delhi", "Medium", &["CRM", "Communication", "Negotiation"], 800_000.0, "Technology", "Office"),
        record(27, 6.0, "MBA", "Sales Manager", "Mumbai", "Large", &["Team Management", "Salesforce", "Strategy"], 2_200_000.0, "Technology", "Hybrid"),
        record(28, 8.0, "Master's", "Principal Engineer", "Bangalore", "Large", &["System Design", "Leadership", "Java"], 4_000_000.0, "Technology", "Hybrid"),
        record(29, 5.0, "Bachelor's", "Cloud Architect", "Hyderabad", "Large", &["AWS", "Azure", "Architecture"], 2_800_000.0, "Technology", "Remote"),
        record(30, 2.0, "Master's", "Research Engineer", "Bangalore", "Large", &["AI", "Research", "Python"], 1_800_000.0, "Technology", "Hybrid"),
        record(31, 4.0, "Bachelor's", "Full Stack Developer", "Bangalore", "Small", &["MERN Stack", "AWS", "Docker"], 1_500_000.0, "Technology", "Remote"),
        record(32, 7.0, "Master's", "CTO", "Mumbai", "Small", &["Leadership", "Architecture", "Strategy"], 5_000_000.0, "Technology", "Hybrid"),
        record(33, 3.0, "Master's", "Blockchain Developer", "Pune", "Medium", &["Solidity", "Web3", "Smart Contracts"], 2_000_000.0, "Technology", "Remote"),
        record(34, 4.0, "Bachelor's", "Cybersecurity Analyst", "Chennai", "Large", &["Security", "Penetration Testing", "CISSP"], 1_800_000.0, "Technology", "Hybrid"),
        record(35, 5.0, "Master's", "AI Engineer", "Bangalore", "Large", &["Deep Learning", "NLP", "Computer Vision"], 2_600_000.0, "Technology", "Remote"),
    ]
}

/// Computes the aggregate dataset statistics served by the stats operation.
///
/// Skills with equal frequency rank alphabetically so the output is stable.
pub fn summarize(records: &[SalaryRecord]) -> DatasetSummary {
    let total = records.len();
    let avg_salary = records.iter().map(|r| r.salary).sum::<f64>() / total.max(1) as f64;
    let avg_experience =
        records.iter().map(|r| r.years_experience).sum::<f64>() / total.max(1) as f64;

    let mut roles: Vec<&str> = records.iter().map(|r| r.job_title.as_str()).collect();
    roles.sort_unstable();
    roles.dedup();

    let min = records.iter().map(|r| r.salary).fold(f64::INFINITY, f64::min);
    let max = records
        .iter()
        .map(|r| r.salary)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        for skill in &r.skills {
            *counts.entry(skill.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(TOP_SKILLS);

    DatasetSummary {
        total_records: total,
        avg_salary,
        avg_experience,
        unique_roles: roles.len(),
        salary_range: SalaryRange {
            min: if min.is_finite() { min } else { 0.0 },
            max: if max.is_finite() { max } else { 0.0 },
        },
        top_skills: ranked
            .into_iter()
            .map(|(skill, count)| SkillCount {
                skill: skill.to_owned(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_shape() {
        let records = sample_records();
        assert_eq!(records.len(), 35);
        assert_eq!(records[0].job_title, "Software Engineer");
        assert_eq!(records[34].salary, 2_600_000.0);
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let records = sample_records();
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.id as usize, i + 1);
        }
    }

    #[test]
    fn summary_values() {
        let records = sample_records();
        let summary = summarize(&records);

        assert_eq!(summary.total_records, 35);
        assert_eq!(summary.salary_range.min, 600_000.0);
        assert_eq!(summary.salary_range.max, 9_500_000.0);
        assert_eq!(summary.top_skills.len(), 10);
        // Python appears in 9 records, more than any other skill.
        assert_eq!(summary.top_skills[0].skill, "Python");
        assert_eq!(summary.top_skills[0].count, 9);
        assert!(summary.avg_salary > 0.0);
        assert!(summary.unique_roles > 20);
    }
}
