//! Study websites offered alongside the papers

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudySite {
    pub name: &'static str,
    pub url: &'static str,
}

const fn site(name: &'static str, url: &'static str) -> StudySite {
    StudySite { name, url }
}

pub static STUDY_SITES: [StudySite; 15] = [
    site("BBC Bitesize", "https://www.bbc.co.uk/bitesize"),
    site("Save My Exams", "https://www.savemyexams.co.uk"),
    site("Seneca Learning", "https://www.senecalearning.com"),
    site("Maths Genie", "https://www.mathsgenie.co.uk"),
    site("Cognito", "https://www.cognito.org.uk"),
    site("Quizlet", "https://quizlet.com"),
    site("Gojimo", "https://gojimo.com"),
    site("Free Science Lessons", "https://www.freesciencelessons.co.uk"),
    site("Mr Salles", "https://mrsalles.co.uk"),
    site("Mr Bruff", "https://mrbruff.com"),
    site("Craig 'n' Dave", "https://www.craigndave.org"),
    site("Corbettmaths", "https://corbettmaths.com"),
    site("TLMaths", "https://tlmaths.co.uk"),
    site("Physics and Maths Tutor", "https://www.physicsandmathstutor.com"),
    site("Tes", "https://www.tes.com"),
];
