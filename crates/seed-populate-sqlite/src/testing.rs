//! Test support shared by this crate and its dependents.

/// Tables of the reservation system the seeder writes into.
///
/// The populator never creates these; tests do.
pub const CLOWDER_DDL: &str = r#"
CREATE TABLE Users(
    id integer primary key,
    username varchar(32) not null,
    name text not null,
    email text not null,
    phone varchar(24) not null
);
CREATE TABLE Machines(
    id integer primary key,
    name varchar(255),
    arch varchar(255),
    microarch varchar(255),
    cores integer not null,
    memory integer not null
);
CREATE TABLE Reservations(
    id integer primary key,
    user integer,
    machine integer,
    start datetime,
    end datetime,
    ended datetime,
    pxepath text,
    nfsroot text,

    FOREIGN KEY(user) REFERENCES Users(id),
    FOREIGN KEY(machine) REFERENCES Machines(id)
);
"#;
