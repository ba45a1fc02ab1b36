//! Template files for a cordova Windows platform directory.
//!
//! The manifests mirror the shape of the platform templates: one per dialect,
//! each with Identity, Properties, Applications and Capabilities.

use std::path::Path;

use crate::core::dialect::{Dialect, DIALECTS, PROJECT_WINDOWS10};

const WINDOWS80: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/2010/manifest">
    <Identity Name="$guid1$" Version="1.0.0.0" Publisher="CN=Apache Cordova Team" />
    <Properties>
        <DisplayName>$projectname$</DisplayName>
        <PublisherDisplayName>Apache Cordova Team</PublisherDisplayName>
        <Logo>images\storelogo.png</Logo>
    </Properties>
    <Prerequisites>
        <OSMinVersion>6.2.1</OSMinVersion>
        <OSMaxVersionTested>6.2.1</OSMaxVersionTested>
    </Prerequisites>
    <Resources>
        <Resource Language="x-generate" />
    </Resources>
    <Applications>
        <Application Id="$safeprojectname$" StartPage="www/index.html">
            <VisualElements DisplayName="$projectname$" Logo="images\logo.png" SmallLogo="images\smalllogo.png" Description="CordovaApp" ForegroundText="light" BackgroundColor="#464646">
                <DefaultTile ShowName="allLogos" />
                <SplashScreen Image="images\splashscreen.png" />
            </VisualElements>
        </Application>
    </Applications>
    <Capabilities>
        <Capability Name="internetClient" />
    </Capabilities>
</Package>
"##;

const WINDOWS81: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/2010/manifest" xmlns:m2="http://schemas.microsoft.com/appx/2013/manifest">
    <Identity Name="$guid1$" Version="1.0.0.0" Publisher="CN=Apache Cordova Team" />
    <Properties>
        <DisplayName>$projectname$</DisplayName>
        <PublisherDisplayName>Apache Cordova Team</PublisherDisplayName>
        <Logo>images\storelogo.png</Logo>
    </Properties>
    <Prerequisites>
        <OSMinVersion>6.3.0</OSMinVersion>
        <OSMaxVersionTested>6.3.0</OSMaxVersionTested>
    </Prerequisites>
    <Resources>
        <Resource Language="x-generate" />
    </Resources>
    <Applications>
        <Application Id="$safeprojectname$" StartPage="www/index.html">
            <m2:VisualElements DisplayName="$projectname$" Description="CordovaApp" ForegroundText="light" BackgroundColor="#464646" Square150x150Logo="images\Square150x150Logo.png" Square30x30Logo="images\Square30x30Logo.png">
                <m2:SplashScreen Image="images\splashscreen.png" />
            </m2:VisualElements>
            <!-- Rules are managed by the prepare step -->
            <ApplicationContentUriRules>
                <Rule Match="https://old.example.com" Type="include" />
            </ApplicationContentUriRules>
        </Application>
    </Applications>
    <Capabilities>
        <DeviceCapability Name="webcam" />
        <Capability Name="internetClient" />
    </Capabilities>
</Package>
"##;

const PHONE81: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/2010/manifest" xmlns:m2="http://schemas.microsoft.com/appx/2013/manifest" xmlns:m3="http://schemas.microsoft.com/appx/2014/manifest" xmlns:mp="http://schemas.microsoft.com/appx/2014/phone/manifest">
    <Identity Name="$guid1$" Version="1.0.0.0" Publisher="CN=Apache Cordova Team" />
    <mp:PhoneIdentity PhoneProductId="$guid1$" PhonePublisherId="db093ed5-53b1-45f7-af72-751e8f36ab80" />
    <Properties>
        <DisplayName>$projectname$</DisplayName>
        <PublisherDisplayName>Apache Cordova Team</PublisherDisplayName>
        <Logo>images\StoreLogo.png</Logo>
    </Properties>
    <Prerequisites>
        <OSMinVersion>6.3.1</OSMinVersion>
        <OSMaxVersionTested>6.3.1</OSMaxVersionTested>
    </Prerequisites>
    <Resources>
        <Resource Language="x-generate" />
    </Resources>
    <Applications>
        <Application Id="$safeprojectname$" StartPage="www/index.html">
            <m3:VisualElements DisplayName="$projectname$" Square150x150Logo="images\Square150x150Logo.png" Square44x44Logo="images\Square44x44Logo.png" Description="CordovaApp" ForegroundText="light" BackgroundColor="transparent">
                <m3:DefaultTile Square71x71Logo="images\Square71x71Logo.png" />
                <m3:SplashScreen Image="images\SplashScreenPhone.png" />
            </m3:VisualElements>
        </Application>
    </Applications>
    <Capabilities>
        <Capability Name="internetClientServer" />
    </Capabilities>
</Package>
"##;

const WINDOWS10: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/manifest/foundation/windows10" xmlns:mp="http://schemas.microsoft.com/appx/2014/phone/manifest" xmlns:uap="http://schemas.microsoft.com/appx/manifest/uap/windows10" IgnorableNamespaces="uap mp">
    <Identity Name="$guid1$" Version="1.0.0.0" Publisher="CN=Apache Cordova Team" />
    <mp:PhoneIdentity PhoneProductId="$guid1$" PhonePublisherId="00000000-0000-0000-0000-000000000000" />
    <Properties>
        <DisplayName>$projectname$</DisplayName>
        <PublisherDisplayName>Apache Cordova Team</PublisherDisplayName>
        <Logo>images\StoreLogo.png</Logo>
    </Properties>
    <Dependencies>
        <TargetDeviceFamily Name="Windows.Universal" MinVersion="10.0.0.0" MaxVersionTested="10.0.0.0" />
    </Dependencies>
    <Resources>
        <Resource Language="x-generate" />
    </Resources>
    <Applications>
        <Application Id="$safeprojectname$" StartPage="ms-appx-web:///www/index.html">
            <uap:VisualElements DisplayName="$projectname$" Square150x150Logo="images\Square150x150Logo.png" Square44x44Logo="images\Square44x44Logo.png" Description="CordovaApp" BackgroundColor="#464646">
                <uap:SplashScreen Image="images\splashscreen.png" />
            </uap:VisualElements>
        </Application>
    </Applications>
    <Capabilities>
        <DeviceCapability Name="location" />
        <Capability Name="internetClient" />
        <Capability Name="documentsLibrary" />
    </Capabilities>
</Package>
"##;

/// Windows 10 project file with SDK version properties.
pub const PROJECT_FIXTURE: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
    <PropertyGroup Label="Globals">
        <ProjectGuid>{3BCB8B55-CD5D-4D3B-8F55-22D5D1AFF8A2}</ProjectGuid>
    </PropertyGroup>
    <PropertyGroup>
        <TargetPlatformIdentifier>UAP</TargetPlatformIdentifier>
        <TargetPlatformVersion>10.0.10240.0</TargetPlatformVersion>
        <TargetPlatformMinVersion>10.0.10240.0</TargetPlatformMinVersion>
        <DefaultLanguage>en-US</DefaultLanguage>
    </PropertyGroup>
    <Import Project="CordovaApp.projitems" Label="Shared" />
</Project>
"##;

/// Template manifest for `dialect`.
pub fn manifest_fixture(dialect: Dialect) -> String {
    match dialect {
        Dialect::Windows80 => WINDOWS80,
        Dialect::Windows81 => WINDOWS81,
        Dialect::Phone81 => PHONE81,
        Dialect::Windows10 => WINDOWS10,
    }
    .to_string()
}

/// Write the four manifests and the Windows 10 project file into `root`.
pub fn write_platform(root: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root)?;
    for dialect in DIALECTS {
        std::fs::write(root.join(dialect.file_name()), manifest_fixture(dialect))?;
    }
    std::fs::write(root.join(PROJECT_WINDOWS10), PROJECT_FIXTURE)
}
