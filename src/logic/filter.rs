use crate::model::Student;

/// Case-insensitive substring match across the searchable student fields.
/// The contact number is matched literally. An empty term matches everything.
pub fn matches_search(student: &Student, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    student.student_name.to_lowercase().contains(&term)
        || student.address.to_lowercase().contains(&term)
        || student.semester.to_lowercase().contains(&term)
        || student.contact_no.contains(&term)
}

/// Derived view over the cached student snapshot, recomputed synchronously
/// on every change to the term or the snapshot. Preserves snapshot order.
pub fn filter_students(students: Vec<Student>, term: &str) -> Vec<Student> {
    students
        .into_iter()
        .filter(|student| matches_search(student, term))
        .collect()
}
