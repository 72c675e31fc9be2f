// Built-in skill taxonomy: (canonical name, extra aliases, priority).
// The canonical name is always an alias of itself. Lower priority sorts first.

pub(super) const BUILTIN_SKILLS: &[(&str, &[&str], u32)] = &[
    // Programming languages
    ("Python", &["python3"], 10),
    ("Java", &[], 10),
    ("JavaScript", &["ecmascript"], 10),
    ("TypeScript", &["ts"], 10),
    ("C++", &["cpp"], 10),
    ("C#", &["csharp"], 10),
    ("Golang", &["go lang"], 10),
    ("Rust", &[], 10),
    ("Ruby", &[], 10),
    ("PHP", &[], 10),
    ("Perl", &[], 10),
    ("R", &[], 10),
    ("Swift", &[], 10),
    ("Kotlin", &[], 10),
    ("Objective-C", &["objc"], 10),
    ("Scala", &[], 10),
    ("Solidity", &[], 10),
    ("SQL", &[], 10),
    ("HTML", &["html5"], 10),
    ("CSS", &["css3"], 10),
    ("Bash", &["shell scripting"], 10),
    ("PowerShell", &[], 10),
    ("VHDL", &[], 10),
    ("Verilog", &[], 10),
    // Frameworks and libraries
    ("React", &["react.js", "reactjs"], 20),
    ("React Native", &[], 20),
    ("Angular", &["angularjs"], 20),
    ("Vue", &["vue.js", "vuejs"], 20),
    ("Node.js", &["nodejs"], 20),
    ("Express.js", &["expressjs"], 20),
    ("Django", &[], 20),
    ("Flask", &[], 20),
    ("Spring Boot", &["spring framework"], 20),
    ("Hibernate", &[], 20),
    ("ASP.NET", &[], 20),
    ("Flutter", &[], 20),
    ("Android", &[], 20),
    ("iOS", &[], 20),
    ("REST", &["restful", "rest api"], 20),
    ("GraphQL", &[], 20),
    ("SOAP", &[], 20),
    ("Microservices", &["microservice"], 20),
    ("Serverless", &[], 20),
    // Cloud and DevOps
    ("AWS", &["amazon web services"], 30),
    ("Azure", &["microsoft azure"], 30),
    ("GCP", &["google cloud", "google cloud platform"], 30),
    ("Docker", &[], 30),
    ("Kubernetes", &["k8s"], 30),
    ("Terraform", &[], 30),
    ("Jenkins", &[], 30),
    ("CI/CD", &["continuous integration", "continuous deployment", "continuous delivery"], 30),
    ("DevOps", &[], 30),
    ("DevSecOps", &[], 30),
    ("SRE", &["site reliability engineering"], 30),
    ("Linux", &[], 30),
    ("Unix", &[], 30),
    ("Nginx", &[], 30),
    ("Cloud Computing", &[], 30),
    ("Load Balancing", &[], 30),
    ("Networking", &["tcp/ip", "dns"], 30),
    ("Git", &[], 30),
    ("GitHub", &[], 30),
    ("GitLab", &[], 30),
    // Data and machine learning
    ("Machine Learning", &["ml"], 40),
    ("Deep Learning", &["neural networks"], 40),
    ("Artificial Intelligence", &["ai"], 40),
    ("NLP", &["natural language processing"], 40),
    ("Computer Vision", &["opencv"], 40),
    ("Reinforcement Learning", &[], 40),
    ("MLOps", &["machine learning operations"], 40),
    ("Data Science", &[], 40),
    ("Data Analysis", &["data analytics"], 40),
    ("Data Engineering", &[], 40),
    ("Data Visualization", &[], 40),
    ("Data Modeling", &[], 40),
    ("Data Warehousing", &[], 40),
    ("Business Intelligence", &[], 40),
    ("ETL", &[], 40),
    ("Spark", &["apache spark", "pyspark"], 40),
    ("Hadoop", &[], 40),
    ("Hive", &[], 40),
    ("Kafka", &["apache kafka"], 40),
    ("Airflow", &["apache airflow"], 40),
    ("Pandas", &[], 40),
    ("NumPy", &[], 40),
    ("SciPy", &[], 40),
    ("Scikit-learn", &["sklearn"], 40),
    ("TensorFlow", &[], 40),
    ("PyTorch", &[], 40),
    ("Keras", &[], 40),
    ("Tableau", &[], 40),
    ("Power BI", &["powerbi"], 40),
    ("Microsoft Excel", &["ms excel"], 40),
    ("A/B Testing", &["ab testing"], 40),
    // Databases
    ("PostgreSQL", &["postgres"], 50),
    ("MySQL", &[], 50),
    ("MongoDB", &["mongo"], 50),
    ("Oracle", &[], 50),
    ("NoSQL", &[], 50),
    ("Redis", &[], 50),
    // Security
    ("Cybersecurity", &["security", "information security"], 60),
    ("Encryption", &["cryptography"], 60),
    ("Authentication", &["oauth", "jwt"], 60),
    ("Penetration Testing", &["pentesting"], 60),
    ("Vulnerability Assessment", &[], 60),
    ("Identity Management", &["active directory", "ldap"], 60),
    ("SIEM", &[], 60),
    ("Regulatory Compliance", &["gdpr", "hipaa", "sox", "pci dss", "iso 27001"], 60),
    // Testing and quality
    ("Testing", &["unit testing", "test automation"], 70),
    ("Quality Assurance", &["qa"], 70),
    ("Selenium", &[], 70),
    ("Cypress", &[], 70),
    ("Jest", &[], 70),
    ("Pytest", &[], 70),
    ("JUnit", &[], 70),
    // Blockchain
    ("Blockchain", &["distributed ledger"], 80),
    ("Smart Contracts", &[], 80),
    ("Web3", &[], 80),
    ("Ethereum", &[], 80),
    // Embedded and hardware
    ("Embedded Systems", &["embedded"], 80),
    ("FPGA", &[], 80),
    ("IoT", &["internet of things"], 80),
    ("Robotics", &[], 80),
    ("PLC", &["scada"], 80),
    // Process and tooling
    ("Agile", &[], 90),
    ("Scrum", &[], 90),
    ("Kanban", &[], 90),
    ("Jira", &[], 90),
    ("Confluence", &[], 90),
    ("ITIL", &["itsm"], 90),
    ("Salesforce", &["crm"], 90),
    ("SAP", &["erp"], 90),
    ("Technical Writing", &[], 90),
    // Design
    ("UX Design", &["user experience", "ux", "user research", "usability testing"], 100),
    ("UI Design", &["user interface", "ui", "wireframing", "prototyping"], 100),
    ("Figma", &[], 100),
    ("Photoshop", &["adobe photoshop"], 100),
    ("Illustrator", &["adobe illustrator"], 100),
    ("AutoCAD", &[], 100),
    ("SolidWorks", &[], 100),
    ("Accessibility", &["wcag", "a11y"], 100),
    // Business and marketing
    ("Project Management", &["pmp"], 110),
    ("Product Management", &[], 110),
    ("Digital Marketing", &["marketing", "email marketing", "social media"], 110),
    ("SEO", &["search engine optimization"], 110),
    ("SEM", &["ppc"], 110),
    ("Analytics", &["google analytics"], 110),
    ("Risk Management", &[], 110),
    ("Vendor Management", &["procurement"], 110),
    ("Budgeting", &["forecasting"], 110),
    ("Strategic Planning", &[], 110),
    // Soft skills
    ("Leadership", &["team management", "team leadership"], 120),
    ("Communication", &["communication skills"], 120),
    ("Presentation Skills", &["public speaking"], 120),
    ("Negotiation", &[], 120),
    ("Problem Solving", &["problem-solving"], 120),
    ("Critical Thinking", &[], 120),
    ("Time Management", &[], 120),
    ("Decision Making", &[], 120),
];
