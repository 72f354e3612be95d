use crate::core::employee::Employee;
use crate::core::project::{Project, RateKind};

/// The hourly rate a project pays one of its employees: the employee's
/// Dublin rate when the project selects it, the local rate otherwise.
pub fn resolve_rate(employee: &Employee, project: &Project) -> f64 {
    match project.rate_kind {
        RateKind::Dublin => employee.dublin_rate,
        RateKind::Local => employee.local_rate,
    }
}

#[cfg(test)]
mod rates_tests {
    use super::*;
    use crate::core::project::ProjectStatus;
    use rstest::rstest;

    fn carpenter() -> Employee {
        Employee {
            id: "1".into(),
            name: "John Smith".into(),
            role: "Carpenter".into(),
            local_rate: 45.0,
            dublin_rate: 55.0,
        }
    }

    fn project(rate_kind: RateKind) -> Project {
        Project {
            id: "1".into(),
            name: "Kitchen Renovation".into(),
            client: "Smith Residence".into(),
            status: ProjectStatus::Active,
            rate_kind,
        }
    }

    #[rstest]
    #[case(RateKind::Local, 45.0)]
    #[case(RateKind::Dublin, 55.0)]
    fn it_should_select_the_rate_the_project_is_configured_for(
        #[case] kind: RateKind,
        #[case] expected: f64,
    ) {
        assert_eq!(resolve_rate(&carpenter(), &project(kind)), expected);
    }
}
