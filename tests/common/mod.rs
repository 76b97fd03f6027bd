//! Shared test constants and helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Journal articles: one with every link field, one with accents, one bare
/// apart from a note with escaped characters.
pub const JOURNAL_BIB: &str = r#"
@article{doe2020,
    author = {Doe, John and Roe, Jane},
    title = {Fibre Lasers in Practice},
    journal = {Optics Letters},
    volume = {45},
    number = {2},
    pages = {100--104},
    year = {2020},
    doi = {10.1364/OL.45.000100},
    pdf = {papers/doe2020.pdf},
    url = {https://example.org/doe2020},
    slides = {slides/doe2020.pdf},
    poster = {posters/doe2020.pdf}
}

@article{mueller2019,
    author = {M{\"u}ller, J{\"o}rg},
    title = {{\'E}tude of Coherent Light},
    journal = {Physical Review A},
    volume = {99},
    pages = {013801},
    year = {2019}
}

@article{bare2018,
    title = {An Untitled Note},
    journal = {Notes},
    note = {Costs in \$ and 50\% of R\&D},
    year = {2018}
}
"#;

/// Conference talks covering every keyword combination.
pub const CONFERENCE_BIB: &str = r#"
@inproceedings{pdp2021,
    author = {Doe, John},
    title = {Record Transmission},
    booktitle = {Optical Fiber Communication Conference},
    year = {2021},
    keywords = {postdeadline}
}

@inproceedings{both2021,
    author = {Doe, John},
    title = {Invited and Late},
    booktitle = {ECOC},
    year = {2021},
    keywords = {invited, postdeadline}
}

@inproceedings{inv2020,
    author = {Roe, Jane},
    title = {Keynote on Lasers},
    booktitle = {CLEO},
    year = {2020},
    keywords = {invited}
}

@conference{talk2019,
    author = {Roe, Jane},
    title = {Regular Talk},
    booktitle = {CLEO},
    year = {2019},
    keywords = {lasers; fibres}
}

@inproceedings{nokw2018,
    author = {Moe, Max},
    title = {No Keywords Here},
    booktitle = {IPC},
    year = {2018}
}
"#;

pub const PATENT_BIB: &str = r#"
@patent{pat2017,
    author = {Doe, John},
    title = {Laser Apparatus},
    number = {US 9,999,999},
    year = {2017}
}
"#;

pub const BOOK_BIB: &str = r#"
@book{book2015,
    author = {Roe, Jane},
    title = {Nonlinear Optics},
    publisher = {Academic Press},
    year = {2015}
}

@incollection{chap2016,
    author = {Doe, John},
    title = {Fibre Amplifiers},
    booktitle = {Handbook of Optics},
    publisher = {Springer},
    pages = {10--42},
    year = {2016}
}
"#;

/// An entry whose field value is never closed.
pub const MALFORMED_BIB: &str = "@article{broken,\n    title = {Unclosed\n";

/// Helper to create a temporary file with content
pub fn create_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Path of a temp file as a metadata value.
pub fn path_value(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}
